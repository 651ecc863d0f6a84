use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::command::TransactionAction;

pub type AccountNumber = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Current,
}

impl AccountType {
    /// Prefix of generated account numbers, e.g. `SAVINGS0001`.
    pub fn number_prefix(self) -> &'static str {
        match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Current => "CURRENT",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Savings => f.write_str("Savings"),
            AccountType::Current => f.write_str("Current"),
        }
    }
}

/// Withdrawal policy, fixed when the account is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountPolicy {
    /// Balance never goes below zero, a single withdrawal never exceeds `withdrawal_limit`.
    Savings { withdrawal_limit: Decimal },
    /// Balance may go negative, down to `-overdraft_limit`.
    Current { overdraft_limit: Decimal },
}

impl AccountPolicy {
    pub fn account_type(&self) -> AccountType {
        match self {
            AccountPolicy::Savings { .. } => AccountType::Savings,
            AccountPolicy::Current { .. } => AccountType::Current,
        }
    }

    pub fn limit(&self) -> Decimal {
        match *self {
            AccountPolicy::Savings { withdrawal_limit } => withdrawal_limit,
            AccountPolicy::Current { overdraft_limit } => overdraft_limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccountEventKind {
    Deposited,
    Withdrawn,
}

#[derive(Debug)]
struct AccountEvent {
    amount: Decimal,
    kind: AccountEventKind,
    balance_after: Decimal,
    occurred_at: DateTime<Utc>,
}

/// One accepted deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionAction,
    pub amount: Decimal,
    /// Account balance right after this transaction was applied.
    pub resulting_balance: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("{action} amount must be positive")]
    InvalidAmount {
        action: TransactionAction,
        amount: Decimal,
    },
    #[error("Withdrawal limit exceeded. Maximum single withdrawal is {limit}")]
    LimitExceeded { limit: Decimal, amount: Decimal },
    #[error("Insufficient funds. Available balance: {available}")]
    InsufficientFunds { available: Decimal, amount: Decimal },
    #[error("{action} of {amount} would overflow the account balance")]
    BalanceOverflow {
        action: TransactionAction,
        amount: Decimal,
    },
}

/// Result of an accepted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    pub action: TransactionAction,
    pub account_type: AccountType,
    pub amount: Decimal,
    pub new_balance: Decimal,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            TransactionAction::Deposit => write!(
                f,
                "Deposited {:.2} to {} account. New balance: {:.2}",
                self.amount, self.account_type, self.new_balance
            ),
            TransactionAction::Withdrawal => write!(
                f,
                "Withdrew {:.2} from {} account. New balance: {:.2}",
                self.amount, self.account_type, self.new_balance
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Account {
    account_number: AccountNumber,
    holder_name: String,
    policy: AccountPolicy,
    balance: Decimal,
    transactions: Vec<Transaction>,
    created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        account_number: impl Into<AccountNumber>,
        holder_name: impl Into<String>,
        policy: AccountPolicy,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            holder_name: holder_name.into(),
            policy,
            balance: initial_balance,
            transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn account_type(&self) -> AccountType {
        self.policy.account_type()
    }

    pub fn policy(&self) -> AccountPolicy {
        self.policy
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// How much could be withdrawn ignoring the savings single-withdrawal limit.
    /// Saturates at [`Decimal::MAX`].
    pub fn available(&self) -> Decimal {
        match self.policy {
            AccountPolicy::Savings { .. } => self.balance,
            AccountPolicy::Current { overdraft_limit } => self
                .balance
                .checked_add(overdraft_limit)
                .unwrap_or(Decimal::MAX),
        }
    }

    /// Full history, oldest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Last `count` transactions, oldest first.
    pub fn recent_transactions(&self, count: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(count);
        &self.transactions[start..]
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Receipt, AccountError> {
        let event = self.handle_deposit(amount).inspect_err(|err| {
            debug!(account = %self.account_number, %amount, %err, "deposit rejected");
        })?;
        Ok(self.apply(&event))
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Receipt, AccountError> {
        let event = self.handle_withdrawal(amount).inspect_err(|err| {
            debug!(account = %self.account_number, %amount, %err, "withdrawal rejected");
        })?;
        Ok(self.apply(&event))
    }

    fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                action: TransactionAction::Deposit,
                amount,
            });
        }
        let balance_after =
            self.balance
                .checked_add(amount)
                .ok_or(AccountError::BalanceOverflow {
                    action: TransactionAction::Deposit,
                    amount,
                })?;
        Ok(AccountEvent {
            amount,
            kind: AccountEventKind::Deposited,
            balance_after,
            occurred_at: Utc::now(),
        })
    }

    fn handle_withdrawal(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount {
                action: TransactionAction::Withdrawal,
                amount,
            });
        }

        match self.policy {
            AccountPolicy::Savings { withdrawal_limit } => {
                if amount > withdrawal_limit {
                    return Err(AccountError::LimitExceeded {
                        limit: withdrawal_limit,
                        amount,
                    });
                }
                if amount > self.balance {
                    return Err(AccountError::InsufficientFunds {
                        available: self.balance,
                        amount,
                    });
                }
            }
            AccountPolicy::Current { .. } => {
                let available = self.available();
                if amount > available {
                    return Err(AccountError::InsufficientFunds { available, amount });
                }
            }
        }

        let balance_after =
            self.balance
                .checked_sub(amount)
                .ok_or(AccountError::BalanceOverflow {
                    action: TransactionAction::Withdrawal,
                    amount,
                })?;
        Ok(AccountEvent {
            amount,
            kind: AccountEventKind::Withdrawn,
            balance_after,
            occurred_at: Utc::now(),
        })
    }

    /// Events are produced by the handlers above, there's no more validation here.
    /// The resulting balance is computed by the handler.
    fn apply(&mut self, event: &AccountEvent) -> Receipt {
        let account_type = self.account_type();
        let (action, description) = match event.kind {
            AccountEventKind::Deposited => (
                TransactionAction::Deposit,
                format!("Deposit to {account_type} account"),
            ),
            AccountEventKind::Withdrawn => (
                TransactionAction::Withdrawal,
                format!("Withdrawal from {account_type} account"),
            ),
        };
        self.balance = event.balance_after;
        self.transactions.push(Transaction {
            timestamp: event.occurred_at,
            kind: action,
            amount: event.amount,
            resulting_balance: self.balance,
            description,
        });
        debug!(
            account = %self.account_number,
            %action,
            amount = %event.amount,
            balance = %self.balance,
            "transaction applied"
        );

        Receipt {
            action,
            account_type,
            amount: event.amount,
            new_balance: self.balance,
        }
    }
}

use std::collections::{BTreeMap, btree_map::Entry};

use rust_decimal::Decimal;
use tracing::info;

use crate::{
    account::{Account, AccountNumber, AccountPolicy, AccountType, Receipt, Transaction},
    command::{AccountCommand, CreateTransactionCommand, OpenAccountCommand, TransactionAction},
    config::LedgerConfig,
};

use super::{Outcome, SessionError, TransactionProcessError, TransactionProcessor};

/// Accounts of a single session, keyed (and listed) by account number.
#[derive(Debug, Default)]
pub struct InMemorySession {
    config: LedgerConfig,
    accounts: BTreeMap<AccountNumber, Account>,
}

impl InMemorySession {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            accounts: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn create_account(
        &mut self,
        holder_name: &str,
        account_type: AccountType,
        initial_balance: Decimal,
        limit: Option<Decimal>,
    ) -> Result<AccountNumber, SessionError> {
        let holder_name = holder_name.trim();
        if holder_name.is_empty() {
            return Err(SessionError::EmptyHolderName);
        }
        if initial_balance < Decimal::ZERO {
            return Err(SessionError::NegativeInitialBalance(initial_balance));
        }
        let policy = self.policy_for(account_type, limit)?;

        let account_number = self.next_account_number(account_type);
        let Entry::Vacant(entry) = self.accounts.entry(account_number.clone()) else {
            return Err(SessionError::DuplicateAccount(account_number));
        };
        entry.insert(Account::new(
            account_number.clone(),
            holder_name,
            policy,
            initial_balance,
        ));
        info!(
            account = %account_number,
            %account_type,
            balance = %initial_balance,
            limit = %policy.limit(),
            "account opened"
        );
        Ok(account_number)
    }

    pub fn deposit(
        &mut self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<Receipt, TransactionProcessError> {
        Ok(self.account_mut(account_number)?.deposit(amount)?)
    }

    pub fn withdraw(
        &mut self,
        account_number: &str,
        amount: Decimal,
    ) -> Result<Receipt, TransactionProcessError> {
        Ok(self.account_mut(account_number)?.withdraw(amount)?)
    }

    pub fn balance(&self, account_number: &str) -> Result<Decimal, SessionError> {
        Ok(self.get(account_number)?.balance())
    }

    pub fn transactions(&self, account_number: &str) -> Result<&[Transaction], SessionError> {
        Ok(self.get(account_number)?.transactions())
    }

    pub fn account(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn get(&self, account_number: &str) -> Result<&Account, SessionError> {
        self.accounts
            .get(account_number)
            .ok_or_else(|| SessionError::UnknownAccount(account_number.to_string()))
    }

    fn account_mut(&mut self, account_number: &str) -> Result<&mut Account, SessionError> {
        self.accounts
            .get_mut(account_number)
            .ok_or_else(|| SessionError::UnknownAccount(account_number.to_string()))
    }

    fn policy_for(
        &self,
        account_type: AccountType,
        limit: Option<Decimal>,
    ) -> Result<AccountPolicy, SessionError> {
        let limit = limit.unwrap_or_else(|| self.config.default_limit(account_type));
        if limit < Decimal::ZERO {
            return Err(SessionError::NegativeLimit {
                account_type,
                limit,
            });
        }
        match account_type {
            AccountType::Savings => {
                if limit < self.config.min_withdrawal_limit {
                    return Err(SessionError::LimitBelowMinimum {
                        limit,
                        minimum: self.config.min_withdrawal_limit,
                    });
                }
                Ok(AccountPolicy::Savings {
                    withdrawal_limit: limit,
                })
            }
            AccountType::Current => Ok(AccountPolicy::Current {
                overdraft_limit: limit,
            }),
        }
    }

    fn next_account_number(&self, account_type: AccountType) -> AccountNumber {
        format!(
            "{}{:04}",
            account_type.number_prefix(),
            self.accounts.len() + 1
        )
    }
}

impl TransactionProcessor for InMemorySession {
    fn process_transaction(
        &mut self,
        command: AccountCommand,
    ) -> Result<Outcome, TransactionProcessError> {
        match command {
            AccountCommand::Open(OpenAccountCommand {
                holder_name,
                account_type,
                initial_balance,
                limit,
            }) => {
                let account_number =
                    self.create_account(&holder_name, account_type, initial_balance, limit)?;
                Ok(Outcome::Opened {
                    account_number,
                    account_type,
                })
            }
            AccountCommand::CreateTx(CreateTransactionCommand {
                account_number,
                action,
                amount,
            }) => {
                let receipt = match action {
                    TransactionAction::Deposit => self.deposit(&account_number, amount)?,
                    TransactionAction::Withdrawal => self.withdraw(&account_number, amount)?,
                };
                Ok(Outcome::Completed(receipt))
            }
        }
    }
}

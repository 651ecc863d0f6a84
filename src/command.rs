use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::{AccountNumber, AccountType};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Open,
    Deposit,
    Withdrawal,
}

/// Balance-changing action, also recorded as the type of a [`crate::account::Transaction`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionAction {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionAction::Deposit => f.write_str("Deposit"),
            TransactionAction::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAccountCommand {
    pub holder_name: String,
    pub account_type: AccountType,
    pub initial_balance: Decimal,
    /// Withdrawal limit for savings, overdraft limit for current accounts.
    /// `None` picks the configured default.
    pub limit: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTransactionCommand {
    pub account_number: AccountNumber,
    pub action: TransactionAction,
    pub amount: Decimal,
}

#[derive(Debug, Error)]
pub enum AccountCommandError {
    #[error("Amount is required for {action}")]
    AmountRequired { action: TransactionAction },
    #[error("Account number is required for {action}")]
    AccountRequired { action: TransactionAction },
    #[error("Account type is required to open an account")]
    AccountTypeRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCommand {
    Open(OpenAccountCommand),
    CreateTx(CreateTransactionCommand),
}

impl AccountCommand {
    /// Builds a command out of loosely typed input fields.
    ///
    /// Only presence is checked here. Whether an amount is acceptable is up to the account.
    pub fn parse_command(
        kind: TransactionKind,
        account_number: Option<AccountNumber>,
        amount: Option<Decimal>,
        holder_name: Option<String>,
        account_type: Option<AccountType>,
        limit: Option<Decimal>,
    ) -> Result<Self, AccountCommandError> {
        match kind {
            TransactionKind::Open => {
                let account_type = account_type.ok_or(AccountCommandError::AccountTypeRequired)?;
                Ok(Self::Open(OpenAccountCommand {
                    // an empty name is rejected by the session, with its own error
                    holder_name: holder_name.unwrap_or_default(),
                    account_type,
                    initial_balance: amount.unwrap_or(Decimal::ZERO),
                    limit,
                }))
            }
            TransactionKind::Deposit => Ok(Self::CreateTx(Self::parse_create_command(
                account_number,
                amount,
                TransactionAction::Deposit,
            )?)),
            TransactionKind::Withdrawal => Ok(Self::CreateTx(Self::parse_create_command(
                account_number,
                amount,
                TransactionAction::Withdrawal,
            )?)),
        }
    }

    fn parse_create_command(
        account_number: Option<AccountNumber>,
        amount: Option<Decimal>,
        action: TransactionAction,
    ) -> Result<CreateTransactionCommand, AccountCommandError> {
        let Some(account_number) = account_number else {
            return Err(AccountCommandError::AccountRequired { action });
        };
        let Some(amount) = amount else {
            return Err(AccountCommandError::AmountRequired { action });
        };
        Ok(CreateTransactionCommand {
            account_number,
            action,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use super::*;

    #[test]
    fn parse_open_command() {
        let cmd = AccountCommand::parse_command(
            TransactionKind::Open,
            None,
            Some(Decimal::from_u32(100).unwrap()),
            Some("Ada Obi".to_string()),
            Some(AccountType::Savings),
            None,
        )
        .unwrap();
        assert_eq!(
            cmd,
            AccountCommand::Open(OpenAccountCommand {
                holder_name: "Ada Obi".to_string(),
                account_type: AccountType::Savings,
                initial_balance: Decimal::from_u32(100).unwrap(),
                limit: None,
            })
        );

        // missing initial balance opens an empty account
        let cmd = AccountCommand::parse_command(
            TransactionKind::Open,
            None,
            None,
            None,
            Some(AccountType::Current),
            Some(Decimal::from_u32(500).unwrap()),
        )
        .unwrap();
        let AccountCommand::Open(open) = cmd else {
            panic!("expected open command");
        };
        assert_eq!(open.initial_balance, Decimal::ZERO);
        assert!(open.holder_name.is_empty());

        let err = AccountCommand::parse_command(
            TransactionKind::Open,
            None,
            None,
            Some("Ada Obi".to_string()),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, AccountCommandError::AccountTypeRequired));
    }

    #[test]
    fn parse_create_command() {
        // negative amounts pass through, the account rejects them
        let cmd = AccountCommand::parse_command(
            TransactionKind::Withdrawal,
            Some("SAVINGS0001".to_string()),
            Some(Decimal::from_i32(-5).unwrap()),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(
            cmd,
            AccountCommand::CreateTx(CreateTransactionCommand {
                account_number: "SAVINGS0001".to_string(),
                action: TransactionAction::Withdrawal,
                amount: Decimal::from_i32(-5).unwrap(),
            })
        );

        let err = AccountCommand::parse_command(
            TransactionKind::Deposit,
            Some("SAVINGS0001".to_string()),
            None,
            None,
            None,
            None,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Amount is required for Deposit");

        let err = AccountCommand::parse_command(
            TransactionKind::Withdrawal,
            None,
            Some(Decimal::from_u32(5).unwrap()),
            None,
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AccountCommandError::AccountRequired {
                action: TransactionAction::Withdrawal
            }
        ));
    }
}

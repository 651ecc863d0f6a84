use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::{AccountError, AccountNumber, AccountType, Receipt},
    command::{AccountCommand, AccountCommandError},
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Holder name must not be empty")]
    EmptyHolderName,
    #[error("Initial balance must not be negative, got {0}")]
    NegativeInitialBalance(Decimal),
    #[error("{account_type} account limit must not be negative, got {limit}")]
    NegativeLimit {
        account_type: AccountType,
        limit: Decimal,
    },
    #[error("Withdrawal limit {limit} is below the minimum of {minimum}")]
    LimitBelowMinimum { limit: Decimal, minimum: Decimal },
    #[error("Account {0} already exists")]
    DuplicateAccount(AccountNumber),
    #[error("Account {0} not found")]
    UnknownAccount(AccountNumber),
}

#[derive(Debug, Error)]
pub enum TransactionProcessError {
    #[error(transparent)]
    CommandErr(#[from] AccountCommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    SessionErr(#[from] SessionError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Opened {
        account_number: AccountNumber,
        account_type: AccountType,
    },
    Completed(Receipt),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Opened {
                account_number,
                account_type,
            } => write!(f, "Opened {account_type} account {account_number}"),
            Outcome::Completed(receipt) => fmt::Display::fmt(receipt, f),
        }
    }
}

pub trait TransactionProcessor {
    fn process_transaction(
        &mut self,
        command: AccountCommand,
    ) -> Result<Outcome, TransactionProcessError>;
}

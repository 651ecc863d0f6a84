use rust_decimal::Decimal;

use crate::account::AccountType;

/// Session-wide account opening policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Used when a savings account is opened without an explicit limit.
    pub default_withdrawal_limit: Decimal,
    /// Used when a current account is opened without an explicit limit.
    pub default_overdraft_limit: Decimal,
    /// Smallest withdrawal limit a savings account may be opened with.
    pub min_withdrawal_limit: Decimal,
}

impl LedgerConfig {
    pub fn default_limit(&self, account_type: AccountType) -> Decimal {
        match account_type {
            AccountType::Savings => self.default_withdrawal_limit,
            AccountType::Current => self.default_overdraft_limit,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_withdrawal_limit: Decimal::from(5000),
            default_overdraft_limit: Decimal::from(1000),
            min_withdrawal_limit: Decimal::ZERO,
        }
    }
}

use std::io::Write;

use chrono::{DateTime, Utc};
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    account::{Account, AccountNumber, AccountType},
    command::TransactionAction,
};

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub account: AccountNumber,
    pub holder: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Decimal,
    pub limit: Decimal,
    pub transactions: usize,
}

impl From<&Account> for AccountSummary {
    fn from(acc: &Account) -> Self {
        Self {
            account: acc.account_number().to_string(),
            holder: acc.holder_name().to_string(),
            account_type: acc.account_type(),
            balance: acc.balance(),
            limit: acc.policy().limit(),
            transactions: acc.transactions().len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub account: AccountNumber,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionAction,
    pub amount: Decimal,
    pub balance: Decimal,
    pub description: String,
}

/// One row per transaction, accounts in the given order, each history oldest first.
pub fn history_entries<'a>(
    accounts: impl Iterator<Item = &'a Account> + 'a,
) -> impl Iterator<Item = HistoryEntry> + 'a {
    accounts.flat_map(|acc| {
        acc.transactions().iter().map(move |tx| HistoryEntry {
            account: acc.account_number().to_string(),
            timestamp: tx.timestamp,
            kind: tx.kind,
            amount: tx.amount,
            balance: tx.resulting_balance,
            description: tx.description.clone(),
        })
    })
}

pub fn print_records<W, T>(output: &mut W, records: impl Iterator<Item = T>) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut writer = Writer::from_writer(output);
    for record in records {
        if let Err(err) = writer.serialize(record) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}

use std::io::Read;

use crate::{account::AccountType, command::TransactionKind};
use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub account: Option<String>,
    pub amount: Option<Decimal>,
    pub holder: Option<String>,
    pub account_type: Option<AccountType>,
    pub limit: Option<Decimal>,
}

/// Parses a list of account commands in CSV format.
///
/// Yields the line each record starts on together with the parse result.
pub struct CsvCommandParser<R> {
    iter: DeserializeRecordsIntoIter<R, CommandRecord>,
}

impl<R> CsvCommandParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

/// Line is taken before reading, so it points at where the record starts.
/// Malformed records are handed back as errors instead of being skipped.
impl<R> Iterator for CsvCommandParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<CommandRecord>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}

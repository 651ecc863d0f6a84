//! Batch front end for [`bank_ledger`]: reads commands as CSV, runs them against a fresh
//! session and prints the resulting accounts. Holds no business rules of its own.

use std::io::{Read, Write};

use crate::{
    command::AccountCommand,
    config::LedgerConfig,
    processor::{
        TransactionProcessError, TransactionProcessor, in_memory_processor::InMemorySession,
    },
};
use anyhow::{Context, Result};
use csv_parser::CsvCommandParser;
use csv_printer::{AccountSummary, history_entries, print_records};
use tracing::info;
pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: LedgerConfig,
    /// Also print every account's transaction history after the summary.
    pub history: bool,
    pub error_printer: Box<dyn FnMut(u64, TransactionProcessError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvCommandParser::new(self.input);

        let mut session = InMemorySession::new(self.config);

        for (line, row) in parser {
            let row = row.with_context(|| format!("Malformed record at line {line}"))?;
            let result = AccountCommand::parse_command(
                row.kind,
                row.account,
                row.amount,
                row.holder,
                row.account_type,
                row.limit,
            )
            .map_err(TransactionProcessError::from)
            .and_then(|command| session.process_transaction(command));
            match result {
                Ok(outcome) => info!(line, %outcome, "command processed"),
                Err(err) => (self.error_printer)(line, err),
            }
        }

        print_records(self.output, session.accounts().map(AccountSummary::from))?;
        if self.history {
            self.output
                .write_all(b"\n")
                .context("Failed to write history separator")?;
            print_records(self.output, history_entries(session.accounts()))?;
        }
        Ok(())
    }
}

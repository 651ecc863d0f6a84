use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use bank_ledger::{bin_utils::Service, config::LedgerConfig, processor::TransactionProcessError};
use clap::Parser;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bank-ledger", version, about = "Run account commands from a CSV file")]
struct Cli {
    /// CSV file with `type,account,amount,holder,account_type,limit` columns
    input: PathBuf,

    /// Print every account's transaction history after the summary
    #[arg(long)]
    history: bool,

    /// Withdrawal limit for savings accounts opened without one
    #[arg(long, env = "BANK_LEDGER_DEFAULT_WITHDRAWAL_LIMIT", default_value = "5000")]
    default_withdrawal_limit: Decimal,

    /// Overdraft limit for current accounts opened without one
    #[arg(long, env = "BANK_LEDGER_DEFAULT_OVERDRAFT_LIMIT", default_value = "1000")]
    default_overdraft_limit: Decimal,

    /// Smallest withdrawal limit a savings account may be opened with
    #[arg(long, env = "BANK_LEDGER_MIN_WITHDRAWAL_LIMIT", default_value = "0")]
    min_withdrawal_limit: Decimal,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive("bank_ledger=info".parse()?)
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open `{}`", cli.input.display()))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        config: LedgerConfig {
            default_withdrawal_limit: cli.default_withdrawal_limit,
            default_overdraft_limit: cli.default_overdraft_limit,
            min_withdrawal_limit: cli.min_withdrawal_limit,
        },
        history: cli.history,
        error_printer: Box::new(|line, err| match err {
            TransactionProcessError::CommandErr(err) => {
                eprintln!("Error at line {line}: {err}")
            }
            // business rejections, reported the same way the account describes them
            err => eprintln!("Rejected at line {line}: {err}"),
        }),
    };
    service.run()
}

use std::{cell::RefCell, rc::Rc, str::from_utf8};

use bank_ledger::{
    account::AccountError,
    bin_utils::Service,
    config::LedgerConfig,
    processor::{SessionError, TransactionProcessError},
};

const TEST_FILE: &str = include_str!("commands.csv");

type ErrorLog = Rc<RefCell<Vec<TransactionProcessError>>>;

fn run(input: &str, history: bool) -> (String, ErrorLog) {
    let errors: ErrorLog = Rc::default();
    let sink = Rc::clone(&errors);
    let mut output = Vec::new();
    let service = Service {
        input: input.as_bytes(),
        output: &mut output,
        config: LedgerConfig::default(),
        history,
        error_printer: Box::new(move |_line, err| sink.borrow_mut().push(err)),
    };
    service.run().unwrap();
    (from_utf8(&output).unwrap().to_owned(), errors)
}

#[test]
fn process_commands() {
    let (output, errors) = run(TEST_FILE, false);

    // accounts are listed by account number
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "account,holder,type,balance,limit,transactions",
            "CURRENT0002,Tunde Bello,current,-749.50,1000,2",
            "SAVINGS0001,Ada Obi,savings,0,5000,2",
        ]
    );

    let errors = errors.borrow();
    assert_eq!(errors.len(), 7);
    assert!(matches!(
        errors[0],
        TransactionProcessError::AccountErr(AccountError::LimitExceeded { .. })
    ));
    assert!(matches!(
        errors[1],
        TransactionProcessError::AccountErr(AccountError::InsufficientFunds { .. })
    ));
    assert!(matches!(
        errors[2],
        TransactionProcessError::AccountErr(AccountError::InsufficientFunds { .. })
    ));
    assert!(matches!(
        errors[3],
        TransactionProcessError::SessionErr(SessionError::UnknownAccount(_))
    ));
    assert!(matches!(
        errors[4],
        TransactionProcessError::SessionErr(SessionError::EmptyHolderName)
    ));
    assert_eq!(errors[5].to_string(), "Deposit amount must be positive");
    assert!(matches!(errors[6], TransactionProcessError::CommandErr(_)));
}

#[test]
fn print_history() {
    let (output, _) = run(TEST_FILE, true);
    let (summary, history) = output.split_once("\n\n").unwrap();
    assert_eq!(summary.lines().count(), 3);

    let rows: Vec<Vec<&str>> = history
        .lines()
        .map(|line| line.split(',').collect())
        .collect();
    assert_eq!(
        rows[0],
        vec!["account", "timestamp", "type", "amount", "balance", "description"]
    );
    // timestamps vary between runs, everything else is fixed
    let fixed: Vec<Vec<&str>> = rows[1..]
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.remove(1);
            row
        })
        .collect();
    assert_eq!(
        fixed,
        vec![
            vec![
                "CURRENT0002",
                "withdrawal",
                "1000",
                "-1000",
                "Withdrawal from Current account"
            ],
            vec![
                "CURRENT0002",
                "deposit",
                "250.50",
                "-749.50",
                "Deposit to Current account"
            ],
            vec!["SAVINGS0001", "deposit", "50", "150", "Deposit to Savings account"],
            vec![
                "SAVINGS0001",
                "withdrawal",
                "150",
                "0",
                "Withdrawal from Savings account"
            ],
        ]
    );
}

#[test]
fn malformed_record_stops_the_run() {
    let input = "type,account,amount,holder,account_type,limit\n\
                 transfer,SAVINGS0001,10,,,\n";
    let mut output = Vec::new();
    let service = Service {
        input: input.as_bytes(),
        output: &mut output,
        config: LedgerConfig::default(),
        history: false,
        error_printer: Box::new(|_, _| {}),
    };
    let err = service.run().unwrap_err();
    assert!(err.to_string().starts_with("Malformed record at line"));
}

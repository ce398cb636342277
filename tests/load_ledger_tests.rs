use ledger::error::LedgerError;
use ledger::transaction::Transaction;
use ledger::{load_ledger, Ledger};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;

#[test]
fn test_load_ledger_fixture() {
    let ledger = load_ledger(Path::new("fixtures").join("test_data.dat")).unwrap();

    assert_eq!(
        ledger,
        Ledger {
            transactions: vec![
                Transaction::new(0, "2015-01-16", "john", "mary", Decimal::from(125)),
                Transaction::new(1, "2015-01-18", "supermarket", "john", Decimal::from(20)),
            ],
            parties: vec![
                "john".to_string(),
                "mary".to_string(),
                "supermarket".to_string()
            ],
        }
    );
}

#[test]
fn test_load_ledger_valid_file() {
    let temp_file = NamedTempFile::new().unwrap();
    let content = r#"2016-03-01, Roxine, Kenneth, 100.50
2016-03-02,Kenneth,Anita,50.25
  2016-03-02 ,Anita,Roxine,  0.75  "#;

    fs::write(&temp_file, content).unwrap();

    let ledger = load_ledger(temp_file.path()).unwrap();

    assert_eq!(ledger.transactions.len(), 3);
    assert_eq!(ledger.parties, vec!["Roxine", "Kenneth", "Anita"]);

    let last = &ledger.transactions[2];
    assert_eq!(last.index, 2);
    assert_eq!(last.date, "2016-03-02");
    assert_eq!(last.outgoing_party, "Anita");
    assert_eq!(last.incoming_party, "Roxine");
    assert_eq!(last.amount_sent, Decimal::from_str("0.75").unwrap());
}

#[test]
fn test_load_ledger_empty_file() {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(&temp_file, "").unwrap();

    let ledger = load_ledger(temp_file.path()).unwrap();

    assert_eq!(ledger, Ledger::default());
}

#[test]
fn test_load_ledger_missing_file() {
    let result = load_ledger("fixtures/rockford_file.dat");

    match result {
        Err(LedgerError::SourceNotFound { path, .. }) => {
            assert_eq!(path, Path::new("fixtures/rockford_file.dat"));
        }
        other => panic!("Expected SourceNotFound error, got {:?}", other),
    }
}

#[test]
fn test_load_ledger_malformed_amount_is_fatal() {
    let temp_file = NamedTempFile::new().unwrap();
    let content = "2016-03-01,Roxine,Kenneth,100\n2016-03-02,Kenneth,Anita,fifty\n2016-03-03,Anita,Roxine,1\n";

    fs::write(&temp_file, content).unwrap();

    match load_ledger(temp_file.path()) {
        Err(LedgerError::MalformedRecord { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected MalformedRecord error, got {:?}", other),
    }
}

#[test]
fn test_load_ledger_large_file() {
    let temp_file = NamedTempFile::new().unwrap();
    let mut content = String::new();

    for i in 1..=100 {
        content.push_str(&format!("2016-01-01,party{},party{},{}\n", i % 7, i % 5, i * 10));
    }

    fs::write(&temp_file, content).unwrap();

    let ledger = load_ledger(temp_file.path()).unwrap();

    assert_eq!(ledger.transactions.len(), 100);

    let tx_50 = &ledger.transactions[49];
    assert_eq!(tx_50.index, 49);
    assert_eq!(tx_50.outgoing_party, "party1");
    assert_eq!(tx_50.incoming_party, "party0");
    assert_eq!(tx_50.amount_sent, Decimal::from(500));

    // party0 through party6, with party1 seen first
    assert_eq!(ledger.parties.len(), 7);
    assert_eq!(ledger.parties[0], "party1");
}

pub mod balance;
pub mod engine;
pub mod error;
pub mod report;
pub mod transaction;

use crate::error::LedgerError;
use crate::transaction::{LedgerRow, Transaction};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;

const FIELDS_PER_RECORD: usize = 4;

/// Transactions in source order plus every party they mention, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub parties: Vec<String>,
}

pub fn load_ledger<P: AsRef<Path>>(path: P) -> Result<Ledger, LedgerError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LedgerError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        },
        _ => LedgerError::Io(source),
    })?;

    let ledger = read_ledger(file)?;
    tracing::debug!(
        path = %path.display(),
        transactions = ledger.transactions.len(),
        parties = ledger.parties.len(),
        "loaded ledger"
    );

    Ok(ledger)
}

pub fn read_ledger<R: io::Read>(reader: R) -> Result<Ledger, LedgerError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut ledger = Ledger::default();
    let mut seen = HashSet::new();
    let mut record = StringRecord::new();

    while rdr.read_record(&mut record)? {
        let line = record.position().map_or(0, |pos| pos.line());

        if record.len() < FIELDS_PER_RECORD {
            return Err(LedgerError::MalformedRecord {
                line,
                message: format!(
                    "expected {} fields, found {}",
                    FIELDS_PER_RECORD,
                    record.len()
                ),
            });
        }
        record.truncate(FIELDS_PER_RECORD);

        let row: LedgerRow = record.deserialize(None)?;
        let tx = row.into_transaction(ledger.transactions.len(), line)?;

        for party in [&tx.outgoing_party, &tx.incoming_party] {
            if seen.insert(party.clone()) {
                ledger.parties.push(party.clone());
            }
        }
        ledger.transactions.push(tx);
    }

    Ok(ledger)
}

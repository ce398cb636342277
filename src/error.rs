use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger source not found: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read ledger source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record on line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate {
        value: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("Unknown party: {0}")]
    UnknownParty(String),

    #[error("Balance overflow for party {party}")]
    BalanceOverflow { party: String },
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map_or(0, |pos| pos.line());
        let message = err.to_string();

        match err.into_kind() {
            csv::ErrorKind::Io(source) => LedgerError::Io(source),
            _ => LedgerError::MalformedRecord { line, message },
        }
    }
}

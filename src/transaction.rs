use crate::error::LedgerError;

use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// A single transfer of `amount_sent` from `outgoing_party` to `incoming_party`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub index: usize,
    pub date: String,
    pub outgoing_party: String,
    pub incoming_party: String,
    pub amount_sent: Decimal,
}

/// One raw ledger line, positional and headerless:
/// `date,outgoing_party,incoming_party,amount_sent`.
#[derive(Debug, Deserialize)]
pub struct LedgerRow {
    pub date: String,
    pub outgoing_party: String,
    pub incoming_party: String,
    pub amount_sent: String,
}

impl LedgerRow {
    /// Convert the row read from `line` into the transaction at `index`.
    pub fn into_transaction(self, index: usize, line: u64) -> Result<Transaction, LedgerError> {
        let amount_sent =
            parse_amount(&self.amount_sent).ok_or_else(|| LedgerError::MalformedRecord {
                line,
                message: format!("invalid amount '{}'", self.amount_sent),
            })?;

        Ok(Transaction {
            index,
            date: self.date,
            outgoing_party: self.outgoing_party,
            incoming_party: self.incoming_party,
            amount_sent,
        })
    }
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

impl Transaction {
    pub fn new(
        index: usize,
        date: &str,
        outgoing_party: &str,
        incoming_party: &str,
        amount_sent: Decimal,
    ) -> Self {
        Self {
            index,
            date: date.to_string(),
            outgoing_party: outgoing_party.to_string(),
            incoming_party: incoming_party.to_string(),
            amount_sent,
        }
    }
}

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A party's running total immediately after one side of one transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub index: usize,
    pub party: String,
    pub date: String,
    pub balance: Decimal,
}

impl Balance {
    pub fn new(index: usize, party: &str, date: &str, balance: Decimal) -> Self {
        Self {
            index,
            party: party.to_string(),
            date: date.to_string(),
            balance,
        }
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {}",
            self.index, self.date, self.party, self.balance
        )
    }
}

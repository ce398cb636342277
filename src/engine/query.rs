use crate::balance::Balance;
use crate::error::LedgerError;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Returned in place of a value when a party has no snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoRecord {
    pub party: String,
}

impl fmt::Display for NoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No record found for party {}", self.party)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NoRecord(NoRecord),
}

impl<T> Lookup<T> {
    fn no_record(party: &str) -> Self {
        Lookup::NoRecord(NoRecord {
            party: party.to_string(),
        })
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NoRecord(_) => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Lookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Found(value) => fmt::Display::fmt(value, f),
            Lookup::NoRecord(missing) => fmt::Display::fmt(missing, f),
        }
    }
}

/// Parse a `YYYY-MM-DD` date. The year must be exactly four digits with no
/// sign or surrounding whitespace; month and day may drop a leading zero.
pub fn parse_date(value: &str) -> Result<NaiveDate, LedgerError> {
    if !has_date_shape(value) {
        return Err(LedgerError::InvalidDate {
            value: value.to_string(),
            source: None,
        });
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| LedgerError::InvalidDate {
        value: value.to_string(),
        source: Some(source),
    })
}

fn has_date_shape(value: &str) -> bool {
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };

    let mut parts = value.split('-');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            digits(year, 4, 4) && digits(month, 1, 2) && digits(day, 1, 2)
        }
        _ => false,
    }
}

/// Every snapshot for `party`, in the order it was emitted.
pub fn party_history<'a>(balances: &'a [Balance], party: &str) -> Lookup<Vec<&'a Balance>> {
    let history: Vec<&Balance> = balances
        .iter()
        .filter(|bal| bal.party == party)
        .collect();

    if history.is_empty() {
        return Lookup::no_record(party);
    }

    Lookup::Found(history)
}

/// Balance of the most recently emitted snapshot for `party`.
pub fn latest_balance(balances: &[Balance], party: &str) -> Lookup<Decimal> {
    match balances.iter().rev().find(|bal| bal.party == party) {
        Some(bal) => Lookup::Found(bal.balance),
        None => Lookup::no_record(party),
    }
}

/// Closing balance of `party` at the end of `date`.
///
/// Snapshots are put back into emission order by index; their dates are
/// assumed to follow that order. Before the first snapshot the balance is
/// zero, from the last snapshot's date onward it is the last balance, and
/// in between it is the last snapshot dated on or before `date`.
pub fn balance_as_of(
    balances: &[Balance],
    party: &str,
    date: &str,
) -> Result<Lookup<Decimal>, LedgerError> {
    let target = parse_date(date)?;

    let mut snapshots: Vec<&Balance> = balances
        .iter()
        .filter(|bal| bal.party == party)
        .collect();
    if snapshots.is_empty() {
        return Ok(Lookup::no_record(party));
    }
    snapshots.sort_by_key(|bal| bal.index);

    let dated = snapshots
        .iter()
        .map(|bal| parse_date(&bal.date).map(|date| (date, bal.balance)))
        .collect::<Result<Vec<(NaiveDate, Decimal)>, LedgerError>>()?;

    let (first_date, first_balance) = dated[0];
    let (last_date, last_balance) = dated[dated.len() - 1];

    if target < first_date {
        return Ok(Lookup::Found(Decimal::ZERO));
    }
    if target >= last_date {
        return Ok(Lookup::Found(last_balance));
    }

    let mut previous_date = first_date;
    let mut previous_balance = first_balance;
    let mut matched = false;

    for &(snapshot_date, balance) in &dated {
        // Same-day snapshots all count; the day closes on the last of them
        if matched && snapshot_date != previous_date {
            return Ok(Lookup::Found(previous_balance));
        }
        if snapshot_date == target {
            matched = true;
        }
        if snapshot_date > target {
            return Ok(Lookup::Found(previous_balance));
        }

        previous_date = snapshot_date;
        previous_balance = balance;
    }

    // The last snapshot is dated after target, so the loop always returns
    Ok(Lookup::Found(previous_balance))
}

use crate::balance::Balance;
use crate::error::LedgerError;
use crate::transaction::Transaction;

use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

const BALANCE_DP: u32 = 2;

/// Running per-party totals over a stream of transactions.
///
/// Every applied transaction yields two snapshots, the debit of the
/// outgoing party followed by the credit of the incoming party, each
/// rounded to two decimal places at the moment it is posted.
pub struct BalanceDeriver {
    running: HashMap<String, Decimal>,
    next_index: usize,
}

impl BalanceDeriver {
    pub fn new<I, S>(parties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            running: parties
                .into_iter()
                .map(|party| (party.into(), Decimal::ZERO))
                .collect(),
            next_index: 0,
        }
    }

    pub fn apply(&mut self, tx: &Transaction) -> Result<[Balance; 2], LedgerError> {
        // Both new totals are settled before either is stored
        let outgoing = self.total_of(&tx.outgoing_party)?;
        let incoming = self.total_of(&tx.incoming_party)?;

        let debited = shift(outgoing, -tx.amount_sent, &tx.outgoing_party)?;
        let credit_base = if tx.outgoing_party == tx.incoming_party {
            debited
        } else {
            incoming
        };
        let credited = shift(credit_base, tx.amount_sent, &tx.incoming_party)?;

        let debit = self.post(&tx.outgoing_party, &tx.date, debited);
        let credit = self.post(&tx.incoming_party, &tx.date, credited);

        Ok([debit, credit])
    }

    fn total_of(&self, party: &str) -> Result<Decimal, LedgerError> {
        self.running
            .get(party)
            .copied()
            .ok_or_else(|| LedgerError::UnknownParty(party.to_string()))
    }

    fn post(&mut self, party: &str, date: &str, total: Decimal) -> Balance {
        self.running.insert(party.to_string(), total);

        let snapshot = Balance::new(self.next_index, party, date, total);
        self.next_index += 1;
        tracing::trace!(index = snapshot.index, party, balance = %snapshot.balance, "posted");

        snapshot
    }
}

fn shift(total: Decimal, delta: Decimal, party: &str) -> Result<Decimal, LedgerError> {
    total
        .checked_add(delta)
        .map(round_balance)
        .ok_or_else(|| LedgerError::BalanceOverflow {
            party: party.to_string(),
        })
}

pub fn round_balance(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(BALANCE_DP, RoundingStrategy::MidpointNearestEven)
}

pub fn derive_balances(
    parties: &[String],
    transactions: &[Transaction],
) -> Result<Vec<Balance>, LedgerError> {
    let mut deriver = BalanceDeriver::new(parties.iter().cloned());
    let mut balances = Vec::with_capacity(transactions.len() * 2);

    for tx in transactions {
        balances.extend(deriver.apply(tx)?);
    }

    tracing::debug!(
        transactions = transactions.len(),
        snapshots = balances.len(),
        "derived balances"
    );

    Ok(balances)
}

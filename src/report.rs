use crate::balance::Balance;

use csv::Writer;
use std::io::Write;

/// Write every snapshot as CSV with an `index,party,date,balance` header.
pub fn dump_balances<W: Write>(balances: &[Balance], writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);

    for bal in balances {
        wtr.serialize(bal)?;
    }
    wtr.flush()?;

    Ok(())
}

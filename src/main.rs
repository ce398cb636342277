use ledger::{
    balance::Balance,
    engine::{
        deriver::BalanceDeriver,
        query::{balance_as_of, latest_balance, party_history, Lookup},
    },
    error::LedgerError,
    load_ledger,
    report::dump_balances,
    transaction::Transaction,
    Ledger,
};

use anyhow::Context;
use clap::Parser;
use std::io::stdout;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Derive running party balances from a transfer ledger and query them.
#[derive(Parser, Debug)]
struct Args {
    /// Ledger file with `date,outgoing_party,incoming_party,amount` lines
    #[arg(default_value = "fixtures/ledger.csv")]
    ledger: PathBuf,

    /// Party to report on
    #[arg(short, long)]
    party: Option<String>,

    /// Closing balance date for the party (YYYY-MM-DD)
    #[arg(short, long, requires = "party")]
    date: Option<String>,

    /// Print every balance snapshot as CSV
    #[arg(long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    tracing::info!("Processing ledger from: {}", args.ledger.display());
    let ledger = load_ledger(&args.ledger)
        .with_context(|| format!("failed to load ledger {}", args.ledger.display()))?;
    let balances = derive(ledger).await?;

    if args.dump {
        dump_balances(&balances, stdout()).context("failed to write balances")?;
    }

    if let Some(party) = &args.party {
        report_party(&balances, party, args.date.as_deref())?;
    }

    Ok(())
}

async fn derive(ledger: Ledger) -> anyhow::Result<Vec<Balance>> {
    let Ledger {
        transactions,
        parties,
    } = ledger;

    // Channel transactions to the deriver task
    let (tx_channel, mut rx) = mpsc::channel::<Transaction>(100);

    let deriver_task = tokio::spawn(async move {
        let mut deriver = BalanceDeriver::new(parties);
        let mut balances = Vec::new();

        while let Some(tx) = rx.recv().await {
            balances.extend(deriver.apply(&tx)?);
        }

        Ok::<_, LedgerError>(balances)
    });

    for tx in transactions {
        // A closed channel means the deriver failed; its error is reported on join
        if tx_channel.send(tx).await.is_err() {
            break;
        }
    }
    drop(tx_channel);

    let balances = deriver_task.await.context("deriver task panicked")??;
    tracing::info!("Derived {} balance snapshots", balances.len());

    Ok(balances)
}

fn report_party(balances: &[Balance], party: &str, date: Option<&str>) -> anyhow::Result<()> {
    match party_history(balances, party) {
        Lookup::Found(history) => {
            println!("History for {}:", party);
            for bal in history {
                println!("  {}", bal);
            }
        }
        Lookup::NoRecord(missing) => println!("{}", missing),
    }

    println!("Latest balance: {}", latest_balance(balances, party));

    if let Some(date) = date {
        let closing = balance_as_of(balances, party, date)?;
        println!("Balance as of {}: {}", date, closing);
    }

    Ok(())
}

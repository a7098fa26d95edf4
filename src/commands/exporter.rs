// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{bail, Result};
use tracing::info;

use super::Context;
use crate::models::{Transaction, TransactionRecord};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap().trim();
            let ledger = ctx.load_ledger(&ctx.client()?)?;
            export_transactions(ledger.transactions(), &fmt, Path::new(out))?;
            println!("Exported {} transactions to {}", ledger.len(), out);
            Ok(())
        }
        _ => Ok(()),
    }
}

pub fn export_transactions(txs: &[Transaction], fmt: &str, out: &Path) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "description", "amount", "type"])?;
            for t in txs {
                wtr.write_record([
                    t.id.map(|id| id.to_string()).unwrap_or_default(),
                    t.date.to_string(),
                    t.description.clone(),
                    t.amount.to_string(),
                    t.r#type.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<TransactionRecord> = txs.iter().map(TransactionRecord::from).collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    info!(count = txs.len(), format = fmt, path = %out.display(), "exported transactions");
    Ok(())
}

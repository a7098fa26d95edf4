// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context as _, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use tracing::info;

use super::Context;
use crate::models::{Transaction, TransactionRecord, TxType, TypeFilter};
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, pretty_table, recent_years};

pub fn handle(ctx: &Context, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

/// The transaction entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub id: Option<i64>,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub description: String,
    pub amount: Decimal,
    pub r#type: TxType,
}

impl EntryForm {
    pub fn from_matches(sub: &clap::ArgMatches) -> Result<Self> {
        Ok(Self {
            id: sub.get_one::<i64>("id").copied(),
            year: *sub.get_one::<i32>("year").unwrap(),
            month: *sub.get_one::<u32>("month").unwrap(),
            day: *sub.get_one::<u32>("day").unwrap(),
            description: sub.get_one::<String>("description").unwrap().clone(),
            amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
            r#type: *sub.get_one::<TxType>("type").unwrap(),
        })
    }

    /// Checks the form against `today` and builds the record to send.
    pub fn into_record(self, today: NaiveDate) -> Result<TransactionRecord> {
        let years = recent_years(today);
        if !years.contains(&self.year) {
            bail!(
                "Year {} is not selectable (choose {}-{})",
                self.year,
                years[years.len() - 1],
                years[0]
            );
        }
        if !(1..=12).contains(&self.month) {
            bail!("Month {} is outside 1-12", self.month);
        }
        if !(1..=31).contains(&self.day) {
            bail!("Day {} is outside 1-31", self.day);
        }
        let description = self.description.trim();
        if description.is_empty() {
            bail!("Description is required");
        }
        if self.amount < Decimal::ZERO {
            bail!("Amount must not be negative");
        }
        let date = format!("{}-{:02}-{:02}", self.year, self.month, self.day);
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .with_context(|| format!("{} is not a calendar date", date))?;

        Ok(TransactionRecord {
            id: self.id,
            date,
            description: description.to_string(),
            amount: self.amount,
            r#type: self.r#type,
        })
    }
}

fn add(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let record = EntryForm::from_matches(sub)?.into_record(crate::utils::today())?;
    let client = ctx.client()?;
    ctx.save_transaction(&client, &record)?;
    println!(
        "Recorded {} {} on {} '{}'",
        record.r#type,
        fmt_amount(&record.amount),
        record.date,
        record.description
    );

    // Full reload after every write.
    let ledger = ctx.load_ledger(&client)?;
    info!(count = ledger.len(), "reloaded transactions");
    println!("{}", transactions_table(&ledger.transactions().iter().collect::<Vec<_>>()));
    Ok(())
}

fn list(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = ctx.load_ledger(&ctx.client()?)?;
    let data = select_rows(ledger.transactions(), sub);
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if ledger.is_empty() {
        println!("No transactions yet");
        return Ok(());
    }
    println!("{}", transactions_table(&data.iter().collect::<Vec<_>>()));
    Ok(())
}

/// Applies the `--type`, `--year` and `--month` filters, keeping store order.
pub fn select_rows(txs: &[Transaction], sub: &clap::ArgMatches) -> Vec<Transaction> {
    let filter = sub
        .get_one::<TypeFilter>("type")
        .copied()
        .unwrap_or_default();
    let year = sub.get_one::<i32>("year").copied();
    let month = sub.get_one::<u32>("month").copied();

    filter
        .apply(txs)
        .into_iter()
        .filter(|t| year.is_none_or(|y| t.date.year() == y))
        .filter(|t| month.is_none_or(|m| t.date.month() == m))
        .cloned()
        .collect()
}

pub fn transactions_table(txs: &[&Transaction]) -> comfy_table::Table {
    let rows: Vec<Vec<String>> = txs
        .iter()
        .map(|t| {
            vec![
                t.id.map(|id| id.to_string()).unwrap_or_default(),
                t.date.to_string(),
                t.description.clone(),
                fmt_amount(&t.amount),
                t.r#type.to_string(),
            ]
        })
        .collect();
    pretty_table(&["Id", "Date", "Description", "Amount", "Type"], rows)
}

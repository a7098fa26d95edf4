// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Datelike;

use super::transactions::transactions_table;
use super::Context;
use crate::models::{Transaction, TypeFilter};
use crate::summary::{Ledger, MonthReport};
use crate::utils::{fmt_amount, maybe_print_json, month_name, pretty_table};

pub fn handle(ctx: &Context, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let details = sub.get_flag("details");
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| crate::utils::today().year());
    let filter = sub
        .get_one::<TypeFilter>("type")
        .copied()
        .unwrap_or_default();

    let ledger = ctx.load_ledger(&ctx.client()?)?;
    let data = build_view(&ledger, year, filter)?;
    if maybe_print_json(json_flag, jsonl_flag, &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No transactions in {}", year);
        return Ok(());
    }

    println!("{}", summary_table(&data));
    if details {
        for report in &data {
            print_details(report);
        }
    }
    Ok(())
}

/// Reports for `year`, most recent month first, rows narrowed to `filter`.
/// Totals always cover every row of the snapshot.
pub fn build_view(ledger: &Ledger, year: i32, filter: TypeFilter) -> Result<Vec<MonthReport>> {
    let mut reports = ledger.year_report(year)?;
    for r in &mut reports {
        r.transactions.retain(|t| filter.matches(t));
    }
    Ok(reports)
}

pub fn summary_table(data: &[MonthReport]) -> comfy_table::Table {
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            let s = &r.summary;
            vec![
                format!("{} {}", month_name(s.month), s.year),
                fmt_amount(&s.earnings),
                fmt_amount(&s.expenditure),
                fmt_amount(&s.savings),
            ]
        })
        .collect();
    pretty_table(&["Month", "Earnings", "Expenditure", "Savings"], rows)
}

fn print_details(report: &MonthReport) {
    let s = &report.summary;
    println!("\n{} {}", month_name(s.month), s.year);

    if report.has_income() {
        let income: Vec<&Transaction> =
            report.transactions.iter().filter(|t| t.is_credit()).collect();
        println!("Income");
        println!("{}", transactions_table(&income));
    }
    if report.has_expense() {
        let expense: Vec<&Transaction> =
            report.transactions.iter().filter(|t| t.is_debit()).collect();
        println!("Expenses");
        println!("{}", transactions_table(&expense));
    }
}

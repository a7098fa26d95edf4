// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use inex::error::SummaryError;
use inex::models::{Transaction, TransactionRecord, TxType};
use inex::summary::{group_by_month, Ledger, Period};
use rust_decimal::Decimal;

fn tx(date: &str, amount: i64, kind: TxType) -> Transaction {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    Transaction::new(d, "t", Decimal::from(amount), kind).unwrap()
}

fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

fn two_months() -> Ledger {
    Ledger::new(vec![
        tx("2024-01-15", 1000, TxType::Credit),
        tx("2024-01-20", 300, TxType::Debit),
        tx("2024-02-10", 1200, TxType::Credit),
        tx("2024-02-05", 500, TxType::Debit),
    ])
    .unwrap()
}

#[test]
fn two_month_scenario() {
    let l = two_months();
    assert_eq!(l.earnings(2024, 1), dec(1000));
    assert_eq!(l.expenditure(2024, 1), dec(300));
    assert_eq!(l.savings(2024, 1).unwrap(), dec(700));
    assert_eq!(l.earnings(2024, 2), dec(1200));
    assert_eq!(l.expenditure(2024, 2), dec(500));
    assert_eq!(l.previous_savings(2024, 2).unwrap(), dec(700));
    assert_eq!(l.savings(2024, 2).unwrap(), dec(1400));
}

#[test]
fn single_transaction_carries_nothing() {
    let l = Ledger::new(vec![tx("2023-06-01", 50, TxType::Credit)]).unwrap();
    assert_eq!(l.previous_savings(2023, 6).unwrap(), Decimal::ZERO);
    assert_eq!(l.savings(2023, 6).unwrap(), dec(50));
}

#[test]
fn year_without_debits_has_zero_expenditure() {
    let l = Ledger::new(vec![
        tx("2022-03-01", 10, TxType::Credit),
        tx("2022-07-01", 20, TxType::Credit),
    ])
    .unwrap();
    for m in 1..=12 {
        assert_eq!(l.expenditure(2022, m), Decimal::ZERO);
    }
}

#[test]
fn carry_forward_crosses_years_and_empty_months() {
    let l = Ledger::new(vec![
        tx("2023-11-02", 500, TxType::Credit),
        tx("2023-11-09", 100, TxType::Debit),
        // December and January are empty
        tx("2024-02-01", 50, TxType::Debit),
        tx("2024-03-01", 10, TxType::Credit),
    ])
    .unwrap();
    assert_eq!(l.previous_savings(2023, 12).unwrap(), dec(400));
    assert_eq!(l.previous_savings(2024, 1).unwrap(), dec(400));
    assert_eq!(l.previous_savings(2024, 2).unwrap(), dec(400));
    assert_eq!(l.savings(2024, 2).unwrap(), dec(350));
    assert_eq!(l.savings(2024, 3).unwrap(), dec(360));
}

#[test]
fn distant_target_sums_every_earlier_period() {
    let l = Ledger::new(vec![
        tx("2023-11-02", 500, TxType::Credit),
        tx("2024-02-01", 50, TxType::Debit),
        tx("2031-07-01", 25, TxType::Credit),
    ])
    .unwrap();
    assert_eq!(l.previous_savings(i32::MAX, 12).unwrap(), dec(475));
    assert_eq!(l.savings(i32::MAX, 12).unwrap(), dec(475));
    assert_eq!(l.previous_savings(2031, 7).unwrap(), dec(450));
}

#[test]
fn first_period_uses_min_month_of_min_year() {
    let l = Ledger::new(vec![
        tx("2024-01-01", 1, TxType::Credit),
        tx("2023-09-01", 1, TxType::Credit),
        tx("2023-04-01", 1, TxType::Debit),
    ])
    .unwrap();
    assert_eq!(l.first_period().unwrap(), Period::new(2023, 4).unwrap());
    assert_eq!(l.previous_savings(2023, 4).unwrap(), Decimal::ZERO);
    // Before the first period there is nothing to walk.
    assert_eq!(l.previous_savings(2022, 1).unwrap(), Decimal::ZERO);
}

#[test]
fn empty_snapshot_is_invalid_state() {
    let l = Ledger::new(Vec::new()).unwrap();
    assert_eq!(l.earnings(2024, 1), Decimal::ZERO);
    assert!(matches!(
        l.previous_savings(2024, 1),
        Err(SummaryError::InvalidState(_))
    ));
    assert!(matches!(l.savings(2024, 1), Err(SummaryError::InvalidState(_))));
    assert!(l.year_report(2024).unwrap().is_empty());
}

#[test]
fn bad_month_argument_is_rejected() {
    let l = two_months();
    assert!(matches!(
        l.previous_savings(2024, 13),
        Err(SummaryError::Validation(_))
    ));
    assert_eq!(l.earnings(2024, 13), Decimal::ZERO);
}

#[test]
fn decimal_sums_are_exact() {
    let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let txs: Vec<Transaction> = (0..10)
        .map(|_| Transaction::new(d, "coffee", Decimal::new(1, 1), TxType::Debit).unwrap())
        .collect();
    let l = Ledger::new(txs).unwrap();
    assert_eq!(l.expenditure(2024, 5), Decimal::ONE);
}

#[test]
fn records_are_validated_at_the_boundary() {
    let ok = TransactionRecord {
        id: Some(1),
        date: "2024-01-15".into(),
        description: "Salary".into(),
        amount: dec(1000),
        r#type: TxType::Credit,
    };
    let negative = TransactionRecord {
        amount: dec(-5),
        ..ok.clone()
    };
    let bad_date = TransactionRecord {
        date: "15/01/2024".into(),
        ..ok.clone()
    };
    assert_eq!(Ledger::from_records(vec![ok.clone()]).unwrap().len(), 1);
    assert!(matches!(
        Ledger::from_records(vec![ok.clone(), negative]),
        Err(SummaryError::Validation(_))
    ));
    assert!(matches!(
        Ledger::from_records(vec![bad_date]),
        Err(SummaryError::Validation(_))
    ));
}

#[test]
fn groups_sorted_most_recent_first_keeping_row_order() {
    let txs = vec![
        tx("2023-12-31", 1, TxType::Credit),
        tx("2024-02-10", 2, TxType::Credit),
        tx("2024-01-05", 3, TxType::Debit),
        tx("2024-02-01", 4, TxType::Debit),
        tx("2023-12-01", 5, TxType::Debit),
    ];
    let groups = group_by_month(&txs);
    let keys: Vec<(i32, u32)> = groups.iter().map(|g| (g.year, g.month)).collect();
    assert_eq!(keys, vec![(2024, 2), (2024, 1), (2023, 12)]);

    let feb: Vec<Decimal> = groups[0].transactions.iter().map(|t| t.amount).collect();
    assert_eq!(feb, vec![dec(2), dec(4)]);
    let dec_2023: Vec<Decimal> = groups[2].transactions.iter().map(|t| t.amount).collect();
    assert_eq!(dec_2023, vec![dec(1), dec(5)]);
}

#[test]
fn year_report_totals_use_whole_snapshot() {
    let l = Ledger::new(vec![
        tx("2023-12-01", 1000, TxType::Credit),
        tx("2024-01-10", 200, TxType::Debit),
        tx("2024-03-10", 50, TxType::Credit),
    ])
    .unwrap();
    let report = l.year_report(2024).unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!((report[0].summary.year, report[0].summary.month), (2024, 3));
    assert_eq!(report[0].summary.savings, dec(850));
    assert_eq!(report[1].summary.expenditure, dec(200));
    assert_eq!(report[1].summary.savings, dec(800));
    assert_eq!(report[1].transactions.len(), 1);
    assert!(report[0].has_income() && !report[0].has_expense());
    assert!(report[1].has_expense() && !report[1].has_income());
}

#[test]
fn summary_json_shape() {
    let l = two_months();
    let report = l.year_report(2024).unwrap();
    let v = serde_json::to_value(&report[1]).unwrap();
    assert_eq!(v["year"], 2024);
    assert_eq!(v["month"], 1);
    assert_eq!(v["savings"], "700");
    assert_eq!(v["transactions"].as_array().unwrap().len(), 2);
    assert_eq!(v["transactions"][0]["date"], "2024-01-15");
}

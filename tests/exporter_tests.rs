// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use inex::commands::exporter::export_transactions;
use inex::models::{Transaction, TransactionRecord, TxType};
use inex::summary::Ledger;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn sample() -> Vec<Transaction> {
    vec![
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            "Corner Shop, weekly run",
            Decimal::new(1234, 2),
            TxType::Debit,
        )
        .unwrap()
        .with_id(9),
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            "Salary",
            Decimal::from(2500),
            TxType::Credit,
        )
        .unwrap(),
    ]
}

#[test]
fn export_transactions_writes_pretty_json() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");

    export_transactions(&sample(), "json", &out_path).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": 9,
                "date": "2025-01-02",
                "description": "Corner Shop, weekly run",
                "amount": "12.34",
                "type": "DEBIT"
            },
            {
                "date": "2025-01-31",
                "description": "Salary",
                "amount": "2500",
                "type": "CREDIT"
            }
        ])
    );
    assert!(contents.contains("\n  {"), "expected pretty-printed JSON");
}

#[test]
fn export_transactions_writes_csv() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");

    export_transactions(&sample(), "csv", &out_path).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "date", "description", "amount", "type"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][2], "Corner Shop, weekly run");
    assert_eq!(&rows[0][3], "12.34");
    assert_eq!(&rows[1][0], "");
    assert_eq!(&rows[1][4], "CREDIT");
}

#[test]
fn large_amounts_survive_a_json_round_trip() {
    let big: Decimal = "12345678901234567.89".parse().unwrap();
    let txs = vec![Transaction::new(
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        "Windfall",
        big,
        TxType::Credit,
    )
    .unwrap()];
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("big.json");

    export_transactions(&txs, "json", &out_path).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let records: Vec<TransactionRecord> = serde_json::from_str(&contents).unwrap();
    assert_eq!(records[0].amount, big);
    let ledger = Ledger::from_records(records).unwrap();
    assert_eq!(ledger.savings(2025, 3).unwrap(), big);
}

#[test]
fn unknown_format_is_an_error() {
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.xml");
    assert!(export_transactions(&sample(), "xml", &out_path).is_err());
    assert!(!out_path.exists());
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SummaryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxType {
    Credit,
    Debit,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Credit => "CREDIT",
            TxType::Debit => "DEBIT",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREDIT" => Ok(TxType::Credit),
            "DEBIT" => Ok(TxType::Debit),
            other => Err(format!("unknown transaction type '{}' (use credit|debit)", other)),
        }
    }
}

/// Row filter used by the transaction tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    Credit,
    Debit,
    #[default]
    All,
}

impl TypeFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            TypeFilter::Credit => tx.r#type == TxType::Credit,
            TypeFilter::Debit => tx.r#type == TxType::Debit,
            TypeFilter::All => true,
        }
    }

    pub fn apply<'a>(&self, txs: &'a [Transaction]) -> Vec<&'a Transaction> {
        txs.iter().filter(|t| self.matches(t)).collect()
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREDIT" => Ok(TypeFilter::Credit),
            "DEBIT" => Ok(TypeFilter::Debit),
            "ALL" => Ok(TypeFilter::All),
            other => Err(format!(
                "unknown type filter '{}' (use credit|debit|all)",
                other
            )),
        }
    }
}

/// A transaction as the remote store sends and receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: String,
    pub description: String,
    pub amount: Decimal,
    pub r#type: TxType,
}

/// A validated transaction, ready for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub r#type: TxType,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
        r#type: TxType,
    ) -> Result<Self, SummaryError> {
        if amount < Decimal::ZERO {
            return Err(SummaryError::Validation(format!(
                "amount {} on {} is negative",
                amount, date
            )));
        }
        Ok(Self {
            id: None,
            date,
            description: description.into(),
            amount,
            r#type,
        })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn is_credit(&self) -> bool {
        self.r#type == TxType::Credit
    }

    pub fn is_debit(&self) -> bool {
        self.r#type == TxType::Debit
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = SummaryError;

    fn try_from(rec: TransactionRecord) -> Result<Self, Self::Error> {
        let date = parse_record_date(&rec.date)?;
        let tx = Transaction::new(date, rec.description, rec.amount, rec.r#type)?;
        Ok(match rec.id {
            Some(id) => tx.with_id(id),
            None => tx,
        })
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        TransactionRecord {
            id: tx.id,
            date: tx.date.format("%Y-%m-%d").to_string(),
            description: tx.description.clone(),
            amount: tx.amount,
            r#type: tx.r#type,
        }
    }
}

/// Accepts `YYYY-MM-DD`, or an ISO-8601 timestamp starting with one.
fn parse_record_date(s: &str) -> Result<NaiveDate, SummaryError> {
    let s = s.trim();
    let day_part = match s.get(..10) {
        Some(head) if s.len() > 10 && matches!(s.as_bytes()[10], b'T' | b' ') => head,
        _ => s,
    };
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|_| SummaryError::Validation(format!("unparsable date '{}'", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, amount: &str) -> TransactionRecord {
        TransactionRecord {
            id: Some(7),
            date: date.into(),
            description: "Salary".into(),
            amount: amount.parse().unwrap(),
            r#type: TxType::Credit,
        }
    }

    #[test]
    fn record_with_timestamp_date_is_accepted() {
        let tx = Transaction::try_from(rec("2024-03-05T00:00:00.000Z", "10")).unwrap();
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(tx.id, Some(7));
    }

    #[test]
    fn bad_date_and_negative_amount_are_rejected() {
        assert!(matches!(
            Transaction::try_from(rec("2024-13-01", "10")),
            Err(SummaryError::Validation(_))
        ));
        assert!(matches!(
            Transaction::try_from(rec("yesterday", "10")),
            Err(SummaryError::Validation(_))
        ));
        assert!(matches!(
            Transaction::try_from(rec("2024-01-01", "-0.01")),
            Err(SummaryError::Validation(_))
        ));
    }

    #[test]
    fn wire_json_accepts_numeric_amount_and_writes_exact_string() {
        let r: TransactionRecord = serde_json::from_str(
            r#"{"id":3,"date":"2024-01-15","description":"Pay","amount":1000.5,"type":"CREDIT"}"#,
        )
        .unwrap();
        assert_eq!(r.amount, Decimal::new(10005, 1));
        assert_eq!(r.r#type, TxType::Credit);

        let mut out = r.clone();
        out.id = None;
        out.amount = "12345678901234567.89".parse().unwrap();
        let v = serde_json::to_value(&out).unwrap();
        assert!(v.get("id").is_none());
        assert_eq!(v["type"], "CREDIT");
        assert_eq!(v["amount"], "12345678901234567.89");
    }

    #[test]
    fn type_filter_parses_case_insensitively() {
        assert_eq!("debit".parse::<TypeFilter>().unwrap(), TypeFilter::Debit);
        assert_eq!("ALL".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert!("both".parse::<TypeFilter>().is_err());
    }
}

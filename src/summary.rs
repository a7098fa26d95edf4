// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation of transactions.
//!
//! A [`Ledger`] is an immutable, validated snapshot of transactions. It
//! answers point queries for a `(year, month)` period:
//!
//! - [`Ledger::earnings`]: sum of CREDIT amounts in the period.
//! - [`Ledger::expenditure`]: sum of DEBIT amounts in the period.
//! - [`Ledger::previous_savings`]: net carried forward from every earlier
//!   period, starting at the earliest period present in the snapshot.
//! - [`Ledger::savings`]: earnings minus expenditure plus the carry-forward.
//!
//! [`group_by_month`] partitions a list of transactions into per-period
//! groups, most recent first. Nothing here performs I/O or logs.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::SummaryError;
use crate::models::{Transaction, TransactionRecord, TxType};

/// A calendar month. Orders by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, SummaryError> {
        if !(1..=12).contains(&month) {
            return Err(SummaryError::Validation(format!(
                "month {} is outside 1-12",
                month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn of(tx: &Transaction) -> Self {
        Self {
            year: tx.year(),
            month: tx.month(),
        }
    }

    /// Grouping key, `"{year}-{month}"` without zero padding.
    pub fn key(&self) -> String {
        format!("{}-{}", self.year, self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Transactions of one period, in their original order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub transactions: Vec<Transaction>,
}

impl MonthGroup {
    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }
}

/// Derived totals for one period. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub earnings: Decimal,
    pub expenditure: Decimal,
    pub savings: Decimal,
}

/// A month's totals together with its rows, as shown by `inex view`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    #[serde(flatten)]
    pub summary: MonthSummary,
    pub transactions: Vec<Transaction>,
}

impl MonthReport {
    pub fn has_income(&self) -> bool {
        self.transactions.iter().any(Transaction::is_credit)
    }

    pub fn has_expense(&self) -> bool {
        self.transactions.iter().any(Transaction::is_debit)
    }
}

/// Partitions `transactions` by `(year, month)`.
///
/// Each transaction lands in exactly one group and keeps its relative order.
/// Groups are sorted most recent period first; empty periods are absent.
pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, MonthGroup> = HashMap::new();

    for tx in transactions {
        let period = Period::of(tx);
        let key = period.key();
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            MonthGroup {
                year: period.year,
                month: period.month,
                transactions: Vec::new(),
            }
        });
        group.transactions.push(tx.clone());
    }

    let mut out: Vec<MonthGroup> = order
        .into_iter()
        .filter_map(|k| groups.remove(&k))
        .collect();
    out.sort_by(|a, b| b.period().cmp(&a.period()));
    out
}

/// An immutable, validated snapshot of transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Rejects negative amounts. Dates are already typed.
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, SummaryError> {
        if let Some(bad) = transactions.iter().find(|t| t.amount < Decimal::ZERO) {
            return Err(SummaryError::Validation(format!(
                "amount {} on {} is negative",
                bad.amount, bad.date
            )));
        }
        Ok(Self { transactions })
    }

    /// Validates store records; the first malformed record fails the batch.
    pub fn from_records(records: Vec<TransactionRecord>) -> Result<Self, SummaryError> {
        let transactions = records
            .into_iter()
            .map(Transaction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(transactions)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions dated in `year`, in snapshot order.
    pub fn for_year(&self, year: i32) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.year() == year)
            .cloned()
            .collect()
    }

    pub fn earnings(&self, year: i32, month: u32) -> Decimal {
        self.total(year, month, TxType::Credit)
    }

    pub fn expenditure(&self, year: i32, month: u32) -> Decimal {
        self.total(year, month, TxType::Debit)
    }

    fn total(&self, year: i32, month: u32, kind: TxType) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.r#type == kind)
            .filter(|t| t.year() == year && t.month() == month)
            .map(|t| t.amount)
            .sum()
    }

    /// The earliest period: minimum year, then minimum month within it.
    pub fn first_period(&self) -> Result<Period, SummaryError> {
        let min_year = self
            .transactions
            .iter()
            .map(Transaction::year)
            .min()
            .ok_or_else(|| {
                SummaryError::InvalidState("no transactions to determine the first period".into())
            })?;
        let min_month = self
            .transactions
            .iter()
            .filter(|t| t.year() == min_year)
            .map(Transaction::month)
            .min()
            .ok_or_else(|| {
                SummaryError::InvalidState(format!("no transactions in year {}", min_year))
            })?;
        Ok(Period {
            year: min_year,
            month: min_month,
        })
    }

    /// Net (earnings - expenditure) of every period in `[first, target)`.
    /// Only periods with transactions contribute, so the cost is bounded by
    /// the snapshot, not by the distance between the two periods.
    pub fn previous_savings(&self, year: i32, month: u32) -> Result<Decimal, SummaryError> {
        let target = Period::new(year, month)?;
        let first = self.first_period()?;
        if target <= first {
            return Ok(Decimal::ZERO);
        }

        let mut net: BTreeMap<Period, Decimal> = BTreeMap::new();
        for tx in &self.transactions {
            let entry = net.entry(Period::of(tx)).or_insert(Decimal::ZERO);
            match tx.r#type {
                TxType::Credit => *entry += tx.amount,
                TxType::Debit => *entry -= tx.amount,
            }
        }

        Ok(net.range(first..target).map(|(_, v)| *v).sum())
    }

    pub fn savings(&self, year: i32, month: u32) -> Result<Decimal, SummaryError> {
        let carried = self.previous_savings(year, month)?;
        Ok(self.earnings(year, month) - self.expenditure(year, month) + carried)
    }

    pub fn summarize(&self, year: i32, month: u32) -> Result<MonthSummary, SummaryError> {
        let earnings = self.earnings(year, month);
        let expenditure = self.expenditure(year, month);
        let savings = earnings - expenditure + self.previous_savings(year, month)?;
        Ok(MonthSummary {
            year,
            month,
            earnings,
            expenditure,
            savings,
        })
    }

    /// Months of `year` that have transactions, most recent first. Totals are
    /// computed against the whole snapshot, so savings carry across years.
    pub fn year_report(&self, year: i32) -> Result<Vec<MonthReport>, SummaryError> {
        group_by_month(&self.for_year(year))
            .into_iter()
            .map(|g| {
                Ok(MonthReport {
                    summary: self.summarize(g.year, g.month)?,
                    transactions: g.transactions,
                })
            })
            .collect()
    }
}

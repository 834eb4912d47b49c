// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("frequency interval must be positive, got {0}")]
    NonPositiveInterval(i16),
    #[error("transaction '{0}' not found in history")]
    TransactionNotFound(String),
}

/// Unit of time between recurrences of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Days,
        TimeUnit::Weeks,
        TimeUnit::Months,
        TimeUnit::Years,
    ];

    /// The canonical label, also used on the wire in save files.
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Days => "Days",
            TimeUnit::Weeks => "Weeks",
            TimeUnit::Months => "Months",
            TimeUnit::Years => "Years",
        }
    }

    pub fn from_label(label: &str) -> Option<TimeUnit> {
        Self::ALL
            .iter()
            .copied()
            .find(|unit| unit.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How often a recurring transaction repeats. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    interval: i16,
    unit: TimeUnit,
}

impl Frequency {
    pub fn new(interval: i16, unit: TimeUnit) -> Result<Self, ModelError> {
        if interval <= 0 {
            return Err(ModelError::NonPositiveInterval(interval));
        }
        Ok(Self { interval, unit })
    }

    pub fn interval(&self) -> i16 {
        self.interval
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }
}

/// A single income or expense. Negative amounts are expenses,
/// non-negative amounts income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub name: String,
    pub category: String,
    pub amount: f32,
    pub date: NaiveDate,
    pub frequency: Option<Frequency>,
}

impl Transaction {
    pub fn new(
        name: &str,
        category: &str,
        amount: f32,
        date: NaiveDate,
        frequency: Option<Frequency>,
    ) -> Result<Self, ModelError> {
        if name.trim().is_empty() {
            return Err(ModelError::EmptyField("transaction name"));
        }
        if category.trim().is_empty() {
            return Err(ModelError::EmptyField("transaction category"));
        }
        Ok(Self {
            name: name.to_string(),
            category: category.to_string(),
            amount,
            date,
            frequency,
        })
    }

    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }

    pub fn is_recurring(&self) -> bool {
        self.frequency.is_some()
    }

    pub fn abs_amount(&self) -> f32 {
        self.amount.abs()
    }
}

/// Every transaction belonging to one user, in display order.
/// Insertion order is kept as-is; callers re-sort after inserting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionHistory {
    transactions: Vec<Transaction>,
}

impl TransactionHistory {
    pub fn new() -> Self {
        Self::default()
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

    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn remove(&mut self, transaction: &Transaction) -> Result<(), ModelError> {
        match self.transactions.iter().position(|t| t == transaction) {
            Some(index) => {
                self.transactions.remove(index);
                Ok(())
            }
            None => Err(ModelError::TransactionNotFound(transaction.name.clone())),
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Transaction> {
        if index < self.transactions.len() {
            Some(self.transactions.remove(index))
        } else {
            None
        }
    }

    pub fn sort_by_date(&mut self) {
        self.transactions.sort_by_key(|t| t.date);
    }

    /// Signed sum of every transaction, accumulated as f64 to limit
    /// precision loss over long histories.
    pub fn sum(&self) -> f64 {
        self.transactions
            .iter()
            .map(|t| f64::from(t.amount))
            .sum()
    }

    pub fn total_income(&self) -> f64 {
        self.transaction_total(true)
    }

    pub fn total_expenses(&self) -> f64 {
        self.transaction_total(false)
    }

    fn transaction_total(&self, income: bool) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.is_income() == income)
            .map(|t| f64::from(t.abs_amount()))
            .sum()
    }
}

/// One saved user: identity, fixed starting balance and their history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    username: String,
    starting_funds: f64,
    history: TransactionHistory,
}

impl User {
    pub fn new(username: &str, starting_funds: f64) -> Result<Self, ModelError> {
        if username.trim().is_empty() {
            return Err(ModelError::EmptyField("username"));
        }
        Ok(Self {
            username: username.to_string(),
            starting_funds,
            history: TransactionHistory::new(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_username(&mut self, username: &str) -> Result<(), ModelError> {
        if username.trim().is_empty() {
            return Err(ModelError::EmptyField("username"));
        }
        self.username = username.to_string();
        Ok(())
    }

    pub fn starting_funds(&self) -> f64 {
        self.starting_funds
    }

    /// Starting funds plus the signed sum of the history.
    pub fn current_funds(&self) -> f64 {
        self.starting_funds + self.history.sum()
    }

    /// Total income minus total expenses. Differs from
    /// [`current_funds`](User::current_funds) whenever starting funds
    /// are non-zero; both views are part of the reporting surface.
    pub fn balance(&self) -> f64 {
        self.history.total_income() - self.history.total_expenses()
    }

    pub fn history(&self) -> &TransactionHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut TransactionHistory {
        &mut self.history
    }
}

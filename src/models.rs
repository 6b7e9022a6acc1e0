// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::BudgetError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_PAYMENT_METHOD: &str = "Cash";
pub const PAYMENT_METHODS: [&str; 5] = ["Cash", "UPI", "Card", "Bank Transfer", "Other"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    #[default]
    Expense,
    Income,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Expense => "expense",
            TxKind::Income => "income",
        }
    }

    /// Signed effect of `amount` on the balance: income adds, expense subtracts.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TxKind::Expense => -amount,
            TxKind::Income => amount,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TxKind::Expense),
            "income" => Ok(TxKind::Income),
            other => Err(BudgetError::Validation(format!(
                "Unknown transaction type '{}' (use expense|income)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl RecurringInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurringInterval::None => "none",
            RecurringInterval::Daily => "daily",
            RecurringInterval::Weekly => "weekly",
            RecurringInterval::Monthly => "monthly",
        }
    }
}

impl FromStr for RecurringInterval {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(RecurringInterval::None),
            "daily" => Ok(RecurringInterval::Daily),
            "weekly" => Ok(RecurringInterval::Weekly),
            "monthly" => Ok(RecurringInterval::Monthly),
            other => Err(BudgetError::Validation(format!(
                "Unknown recurring interval '{}' (use none|daily|weekly|monthly)",
                other
            ))),
        }
    }
}

/// A transaction as stored, with its surrogate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub category: String,
    pub note: String,
    pub date: String, // yyyy-MM-dd
    pub r#type: TxKind,
    pub recurring_interval: RecurringInterval,
    pub payment_method: String,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.r#type.signed(self.amount)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TxKind::Expense
    }

    /// The editable fields of this record, as passed back to `update`.
    pub fn fields(&self) -> NewTransaction {
        NewTransaction {
            amount: self.amount,
            category: self.category.clone(),
            note: self.note.clone(),
            date: self.date.clone(),
            r#type: self.r#type,
            recurring_interval: self.recurring_interval,
            payment_method: self.payment_method.clone(),
        }
    }
}

/// A transaction before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub category: String,
    pub note: String,
    pub date: String,
    pub r#type: TxKind,
    pub recurring_interval: RecurringInterval,
    pub payment_method: String,
}

impl NewTransaction {
    pub fn expense(amount: Decimal, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            note: String::new(),
            date: date.into(),
            r#type: TxKind::Expense,
            recurring_interval: RecurringInterval::None,
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
        }
    }

    pub fn income(amount: Decimal, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            r#type: TxKind::Income,
            ..Self::expense(amount, category, date)
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn with_payment_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = method.into();
        self
    }

    pub fn with_recurring(mut self, interval: RecurringInterval) -> Self {
        self.recurring_interval = interval;
        self
    }

    pub fn signed_amount(&self) -> Decimal {
        self.r#type.signed(self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub key: String,
    pub icon: String,
    pub label: String,
    pub r#type: TxKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub college: String,
    pub course: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub monthly_budget: Decimal, // 0 means unset
    pub currency_symbol: String,
    pub pin_code: String,
    pub profile: Profile,
    pub profile_image: String,
    pub last_recurring_processed: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monthly_budget: Decimal::ZERO,
            currency_symbol: "$".to_string(),
            pin_code: String::new(),
            profile: Profile::default(),
            profile_image: String::new(),
            last_recurring_processed: None,
        }
    }
}

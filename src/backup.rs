// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Full-state backup document and destructive restore.
//!
//! Each expense carries the balance delta it applied, so deleting a restored
//! row undoes the same amount it would have in the source store.
//!
//! Restore parses and checks the whole document first, then wipes and
//! repopulates the store inside a single SQLite transaction. A bad document
//! therefore leaves existing data as it was.

use crate::balance;
use crate::categories;
use crate::error::{BudgetError, Result};
use crate::models::{
    CategoryEntry, DEFAULT_PAYMENT_METHOD, NewTransaction, Profile, RecurringInterval,
    Transaction, TxKind,
};
use crate::settings;
use crate::transactions;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(with = "json_number")]
    pub amount: Decimal,
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub r#type: TxKind,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
    #[serde(default)]
    pub recurring_interval: RecurringInterval,
    /// Delta this row applied to the balance; absent for hand-written files.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "json_number::optional"
    )]
    pub balance_effect: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub name_key: String,
    pub icon: String,
    pub label: String,
    #[serde(default)]
    pub r#type: TxKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    #[serde(with = "json_number")]
    pub balance: Decimal,
    #[serde(with = "json_number")]
    pub monthly_budget: Decimal,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: String,
    pub user_college: String,
    pub user_course: String,
    pub currency_symbol: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            balance: Decimal::ZERO,
            monthly_budget: Decimal::ZERO,
            user_name: String::new(),
            user_phone: String::new(),
            user_email: String::new(),
            user_college: String::new(),
            user_course: String::new(),
            currency_symbol: "$".to_string(),
        }
    }
}

fn default_payment_method() -> String {
    DEFAULT_PAYMENT_METHOD.to_string()
}

impl From<&Transaction> for ExpenseRecord {
    fn from(t: &Transaction) -> Self {
        Self {
            amount: t.amount,
            category: t.category.clone(),
            date: t.date.clone(),
            note: t.note.clone(),
            r#type: t.r#type,
            payment_method: t.payment_method.clone(),
            recurring_interval: t.recurring_interval,
            balance_effect: None,
        }
    }
}

impl ExpenseRecord {
    pub fn to_new(&self) -> NewTransaction {
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

impl From<&CategoryEntry> for CategoryRecord {
    fn from(c: &CategoryEntry) -> Self {
        Self {
            name_key: c.key.clone(),
            icon: c.icon.clone(),
            label: c.label.clone(),
            r#type: c.r#type,
        }
    }
}

impl CategoryRecord {
    pub fn to_entry(&self) -> CategoryEntry {
        CategoryEntry {
            key: self.name_key.clone(),
            icon: self.icon.clone(),
            label: self.label.clone(),
            r#type: self.r#type,
        }
    }
}

/// Amounts travel as JSON numbers written from and read back through their
/// exact decimal text (serde_json `arbitrary_precision`), never via f64.
mod json_number {
    use rust_decimal::Decimal;
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Number;

    pub fn serialize<S: Serializer>(value: &Decimal, s: S) -> Result<S::Ok, S::Error> {
        let text = value.normalize().to_string();
        text.parse::<Number>()
            .map_err(|e| S::Error::custom(format!("amount {}: {}", text, e)))?
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
        let text = Number::deserialize(d)?.to_string();
        text.parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|e| D::Error::custom(format!("invalid amount {}: {}", text, e)))
    }

    pub mod optional {
        use rust_decimal::Decimal;
        use serde::{Deserialize, Deserializer, Serializer};

        #[derive(Deserialize)]
        struct Wrapped(#[serde(with = "super")] Decimal);

        pub fn serialize<S: Serializer>(value: &Option<Decimal>, s: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Decimal>, D::Error> {
            Ok(Option::<Wrapped>::deserialize(d)?.map(|Wrapped(v)| v))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoreSummary {
    pub transactions: usize,
    pub categories: usize,
}

pub fn export(conn: &Connection) -> Result<BackupDocument> {
    let expenses = transactions::list_all_with_effects(conn)?
        .iter()
        .map(|(t, effect)| ExpenseRecord {
            balance_effect: *effect,
            ..ExpenseRecord::from(t)
        })
        .collect();
    let categories = categories::list(conn)?
        .iter()
        .map(CategoryRecord::from)
        .collect();
    let s = settings::load(conn)?;
    let preferences = Preferences {
        balance: balance::load(conn)?,
        monthly_budget: s.monthly_budget,
        user_name: s.profile.name,
        user_phone: s.profile.phone,
        user_email: s.profile.email,
        user_college: s.profile.college,
        user_course: s.profile.course,
        currency_symbol: s.currency_symbol,
    };
    Ok(BackupDocument {
        expenses,
        categories,
        preferences,
    })
}

pub fn to_json(doc: &BackupDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Parses and checks a document without touching any store.
pub fn parse(json: &str) -> Result<BackupDocument> {
    let doc: BackupDocument = serde_json::from_str(json)?;
    validate(&doc)?;
    Ok(doc)
}

pub fn validate(doc: &BackupDocument) -> Result<()> {
    if let Some(c) = doc.categories.iter().find(|c| c.name_key.trim().is_empty()) {
        return Err(BudgetError::Validation(format!(
            "Category '{}' has an empty nameKey",
            c.label
        )));
    }
    if doc.preferences.monthly_budget < Decimal::ZERO {
        return Err(BudgetError::Validation(format!(
            "monthlyBudget must not be negative (got {})",
            doc.preferences.monthly_budget
        )));
    }
    Ok(())
}

/// Deletes every transaction and user category and resets all settings.
/// Surrogate ids keep counting up afterwards.
pub fn erase_all(conn: &Connection) -> Result<()> {
    transactions::clear(conn)?;
    categories::clear(conn)?;
    settings::reset(conn)?;
    Ok(())
}

/// Replaces the whole store with the document's contents.
pub fn restore(conn: &mut Connection, doc: &BackupDocument) -> Result<RestoreSummary> {
    validate(doc)?;
    let tx = conn.transaction()?;
    erase_all(&tx)?;

    // Oldest first, so new ids preserve the recent-first ordering.
    for record in doc.expenses.iter().rev() {
        transactions::insert(&tx, &record.to_new(), record.balance_effect)?;
    }
    for record in &doc.categories {
        categories::upsert(&tx, &record.to_entry())?;
    }

    let p = &doc.preferences;
    balance::store(&tx, balance::floor(p.balance))?;
    settings::set_monthly_budget(&tx, p.monthly_budget)?;
    settings::set_profile(
        &tx,
        &Profile {
            name: p.user_name.clone(),
            phone: p.user_phone.clone(),
            email: p.user_email.clone(),
            college: p.user_college.clone(),
            course: p.user_course.clone(),
        },
    )?;
    settings::set(&tx, settings::KEY_CURRENCY_SYMBOL, &p.currency_symbol)?;
    tx.commit()?;

    Ok(RestoreSummary {
        transactions: doc.expenses.len(),
        categories: doc.categories.len(),
    })
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{BudgetError, Result};
use crate::models::{CategoryEntry, TxKind};
use rusqlite::{Connection, params};

pub struct Builtin {
    pub key: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    pub r#type: TxKind,
}

pub static BUILTIN: [Builtin; 8] = [
    Builtin { key: "FOOD", icon: "🍔", label: "Food", r#type: TxKind::Expense },
    Builtin { key: "TRANSPORT", icon: "🚌", label: "Transport", r#type: TxKind::Expense },
    Builtin { key: "TEXTBOOKS", icon: "📚", label: "Textbooks", r#type: TxKind::Expense },
    Builtin { key: "RENT", icon: "🏠", label: "Rent", r#type: TxKind::Expense },
    Builtin { key: "ENTERTAINMENT", icon: "🎮", label: "Fun", r#type: TxKind::Expense },
    Builtin { key: "ALLOWANCE", icon: "💌", label: "Allowance", r#type: TxKind::Income },
    Builtin { key: "JOB", icon: "💼", label: "Job", r#type: TxKind::Income },
    Builtin { key: "OTHER", icon: "📦", label: "Other", r#type: TxKind::Expense },
];

/// Case-insensitive lookup in the built-in table, falling back to OTHER.
pub fn builtin(key: &str) -> &'static Builtin {
    BUILTIN
        .iter()
        .find(|b| b.key.eq_ignore_ascii_case(key))
        .unwrap_or_else(fallback)
}

/// The built-in OTHER entry.
pub fn fallback() -> &'static Builtin {
    &BUILTIN[BUILTIN.len() - 1]
}

impl Builtin {
    fn entry(&self) -> CategoryEntry {
        CategoryEntry {
            key: self.key.to_string(),
            icon: self.icon.to_string(),
            label: self.label.to_string(),
            r#type: self.r#type,
        }
    }
}

/// Snapshot of user-defined categories layered over the built-in table.
///
/// Transactions reference categories by key only. Keys that match nothing
/// resolve to the built-in "Other" entry, so resolution never fails.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    custom: Vec<CategoryEntry>,
}

impl CategoryRegistry {
    pub fn new(custom: Vec<CategoryEntry>) -> Self {
        Self { custom }
    }

    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Self::new(list(conn)?))
    }

    pub fn custom(&self) -> &[CategoryEntry] {
        &self.custom
    }

    fn find_custom(&self, key: &str) -> Option<&CategoryEntry> {
        self.custom.iter().rev().find(|c| c.key == key)
    }

    pub fn resolve_icon(&self, key: &str) -> String {
        match self.find_custom(key) {
            Some(c) => c.icon.clone(),
            None => builtin(key).icon.to_string(),
        }
    }

    pub fn resolve_label(&self, key: &str) -> String {
        match self.find_custom(key) {
            Some(c) => c.label.clone(),
            None => builtin(key).label.to_string(),
        }
    }

    /// Everything a category picker offers: built-ins first, then user
    /// categories. A user entry with a built-in key replaces the built-in.
    pub fn choices(&self) -> Vec<CategoryEntry> {
        let mut out: Vec<CategoryEntry> = BUILTIN
            .iter()
            .map(|b| match self.find_custom(b.key) {
                Some(c) => c.clone(),
                None => b.entry(),
            })
            .collect();
        for c in &self.custom {
            if !out.iter().any(|o| o.key == c.key) {
                out.push(c.clone());
            }
        }
        out
    }
}

pub fn upsert(conn: &Connection, entry: &CategoryEntry) -> Result<()> {
    if entry.key.trim().is_empty() {
        return Err(BudgetError::Validation("Category key must not be empty".into()));
    }
    conn.execute(
        "INSERT INTO categories(name_key, icon, label, type) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name_key) DO UPDATE SET icon=excluded.icon, label=excluded.label, type=excluded.type",
        params![entry.key, entry.icon, entry.label, entry.r#type.as_str()],
    )?;
    Ok(())
}

/// Returns false when no category had that key.
pub fn remove(conn: &Connection, key: &str) -> Result<bool> {
    let n = conn.execute("DELETE FROM categories WHERE name_key=?1", params![key])?;
    Ok(n > 0)
}

pub fn list(conn: &Connection) -> Result<Vec<CategoryEntry>> {
    let mut stmt =
        conn.prepare("SELECT name_key, icon, label, type FROM categories ORDER BY label ASC")?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (key, icon, label, typ) = row?;
        data.push(CategoryEntry {
            key,
            icon,
            label,
            r#type: typ.parse().unwrap_or_default(),
        });
    }
    Ok(data)
}

pub fn clear(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM categories", [])?;
    Ok(())
}

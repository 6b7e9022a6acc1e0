// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::CategoryRegistry;
use crate::error::{BudgetError, Result};
use crate::models::{NewTransaction, Transaction};
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

const COLUMNS: &str =
    "id, amount, category, note, date, type, recurring_interval, payment_method, balance_effect";

/// Raw row as stored; amounts are TEXT so they are parsed after the query.
struct RawRow {
    id: i64,
    amount: String,
    category: String,
    note: String,
    date: String,
    r#type: String,
    recurring_interval: String,
    payment_method: String,
    balance_effect: Option<String>,
}

impl RawRow {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            amount: r.get(1)?,
            category: r.get(2)?,
            note: r.get(3)?,
            date: r.get(4)?,
            r#type: r.get(5)?,
            recurring_interval: r.get(6)?,
            payment_method: r.get(7)?,
            balance_effect: r.get(8)?,
        })
    }

    fn into_parts(self) -> Result<(Transaction, Option<Decimal>)> {
        let effect = match self.balance_effect.as_deref() {
            Some(s) => Some(parse_stored_decimal(self.id, s)?),
            None => None,
        };
        let amount = parse_stored_decimal(self.id, &self.amount)?;
        let tx = Transaction {
            id: self.id,
            amount,
            category: self.category,
            note: self.note,
            date: self.date,
            r#type: self.r#type.parse()?,
            recurring_interval: self.recurring_interval.parse()?,
            payment_method: self.payment_method,
        };
        Ok((tx, effect))
    }
}

fn parse_stored_decimal(id: i64, s: &str) -> Result<Decimal> {
    s.parse::<Decimal>().map_err(|_| BudgetError::Corrupt {
        key: format!("transactions[{}]", id),
        value: s.to_string(),
    })
}

/// Appends a row and returns its new id. `effect` is the delta this row
/// applied to the balance, if any.
pub fn insert(conn: &Connection, tx: &NewTransaction, effect: Option<Decimal>) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(amount, category, note, date, type, recurring_interval, payment_method, balance_effect)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            tx.amount.to_string(),
            tx.category,
            tx.note,
            tx.date,
            tx.r#type.as_str(),
            tx.recurring_interval.as_str(),
            tx.payment_method,
            effect.map(|e| e.to_string()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Replaces every field of row `id`. Returns false (and changes nothing) if
/// the row does not exist.
pub fn update(
    conn: &Connection,
    id: i64,
    tx: &NewTransaction,
    effect: Option<Decimal>,
) -> Result<bool> {
    let n = conn.execute(
        "UPDATE transactions SET amount=?1, category=?2, note=?3, date=?4, type=?5,
                recurring_interval=?6, payment_method=?7, balance_effect=?8
         WHERE id=?9",
        params![
            tx.amount.to_string(),
            tx.category,
            tx.note,
            tx.date,
            tx.r#type.as_str(),
            tx.recurring_interval.as_str(),
            tx.payment_method,
            effect.map(|e| e.to_string()),
            id,
        ],
    )?;
    Ok(n > 0)
}

pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    Ok(n > 0)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    Ok(get_with_effect(conn, id)?.map(|(t, _)| t))
}

/// The row plus the balance delta it recorded when it was applied.
pub fn get_with_effect(conn: &Connection, id: i64) -> Result<Option<(Transaction, Option<Decimal>)>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM transactions WHERE id=?1"),
            params![id],
            RawRow::from_row,
        )
        .optional()?;
    raw.map(RawRow::into_parts).transpose()
}

/// Every transaction, most recent first (date DESC, then id DESC).
pub fn list_all(conn: &Connection) -> Result<Vec<Transaction>> {
    Ok(strip_effects(list_all_with_effects(conn)?))
}

/// `list_all` with each row's recorded balance delta.
pub fn list_all_with_effects(conn: &Connection) -> Result<Vec<(Transaction, Option<Decimal>)>> {
    query(
        conn,
        &format!("SELECT {COLUMNS} FROM transactions ORDER BY date DESC, id DESC"),
        &[],
    )
}

/// Transactions whose date starts with `year_month` (`yyyy-MM`), in the
/// same order as `list_all`.
pub fn list_by_month(conn: &Connection, year_month: &str) -> Result<Vec<Transaction>> {
    query(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM transactions WHERE substr(date, 1, length(?1))=?1 ORDER BY date DESC, id DESC"
        ),
        &[&year_month],
    )
    .map(strip_effects)
}

fn strip_effects(rows: Vec<(Transaction, Option<Decimal>)>) -> Vec<Transaction> {
    rows.into_iter().map(|(t, _)| t).collect()
}

fn query(
    conn: &Connection,
    sql: &str,
    args: &[&dyn rusqlite::ToSql],
) -> Result<Vec<(Transaction, Option<Decimal>)>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, RawRow::from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?.into_parts()?);
    }
    tracing::debug!(rows = data.len(), "loaded transactions");
    Ok(data)
}

pub fn clear(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM transactions", [])?;
    Ok(())
}

/// History filter: free-text match on the note or the resolved category
/// label (case-insensitive, blank matches everything), plus an optional
/// exact category key.
pub fn search(
    list: &[Transaction],
    query: &str,
    category: Option<&str>,
    registry: &CategoryRegistry,
) -> Vec<Transaction> {
    let needle = query.trim().to_lowercase();
    list.iter()
        .filter(|t| {
            let matches_query = needle.is_empty()
                || t.note.to_lowercase().contains(&needle)
                || registry
                    .resolve_label(&t.category)
                    .to_lowercase()
                    .contains(&needle);
            let matches_category = category.is_none_or(|c| t.category == c);
            matches_query && matches_category
        })
        .cloned()
        .collect()
}

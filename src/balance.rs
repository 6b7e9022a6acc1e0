// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The running balance and the arithmetic that keeps it at or above zero.
//!
//! Each transaction remembers the delta it actually applied (after the floor),
//! and removing it reverses exactly that delta. Rows without a recorded
//! delta, such as restored backups, are reversed by their signed amount.

use crate::error::Result;
use crate::models::{NewTransaction, Transaction, TxKind};
use crate::settings::{self, KEY_BALANCE};
use rusqlite::Connection;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub balance: Decimal,
    pub effect: Decimal,
}

pub fn floor(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

pub fn apply_added(balance: Decimal, amount: Decimal, kind: TxKind) -> Decimal {
    floor(balance + kind.signed(amount))
}

pub fn apply_removed(balance: Decimal, amount: Decimal, kind: TxKind) -> Decimal {
    floor(balance - kind.signed(amount))
}

/// Adds a transaction and reports the delta that really landed.
pub fn add(balance: Decimal, tx: &NewTransaction) -> Applied {
    let next = apply_added(balance, tx.amount, tx.r#type);
    Applied {
        balance: next,
        effect: next - balance,
    }
}

pub fn remove(balance: Decimal, tx: &Transaction, effect: Option<Decimal>) -> Decimal {
    match effect {
        Some(e) => floor(balance - e),
        None => apply_removed(balance, tx.amount, tx.r#type),
    }
}

/// Swaps the old version's effect for the new one's, flooring once at the
/// end. The recorded effect is relative to the balance without the old row.
pub fn apply_edited(
    balance: Decimal,
    old: &Transaction,
    old_effect: Option<Decimal>,
    new: &NewTransaction,
) -> Applied {
    let without_old = balance - old_effect.unwrap_or_else(|| old.signed_amount());
    let next = floor(without_old + new.signed_amount());
    Applied {
        balance: next,
        effect: next - without_old,
    }
}

pub fn load(conn: &Connection) -> Result<Decimal> {
    settings::get_decimal(conn, KEY_BALANCE)
}

pub fn store(conn: &Connection, value: Decimal) -> Result<()> {
    settings::set_decimal(conn, KEY_BALANCE, value)
}

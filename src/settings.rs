// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key/value settings persisted in the `settings` table.
//!
//! Absent keys read back as their defaults, so a factory reset only has to
//! delete rows.

use crate::error::{BudgetError, Result};
use crate::models::{DATE_FORMAT, Profile, Settings};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub const KEY_BALANCE: &str = "balance";
pub const KEY_BUDGET: &str = "monthly_budget";
pub const KEY_CURRENCY_SYMBOL: &str = "currency_symbol";
pub const KEY_PIN_CODE: &str = "pin_code";
pub const KEY_LAST_PROCESSED: &str = "last_processed";
pub const KEY_USER_NAME: &str = "user_name";
pub const KEY_USER_PHONE: &str = "user_phone";
pub const KEY_USER_EMAIL: &str = "user_email";
pub const KEY_USER_COLLEGE: &str = "user_college";
pub const KEY_USER_COURSE: &str = "user_course";
pub const KEY_PROFILE_IMAGE: &str = "profile_image_uri";

static PIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("valid PIN regex"));

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_string(conn: &Connection, key: &str, default: &str) -> Result<String> {
    Ok(get(conn, key)?.unwrap_or_else(|| default.to_string()))
}

pub fn get_decimal(conn: &Connection, key: &str) -> Result<Decimal> {
    match get(conn, key)? {
        Some(s) => s.parse::<Decimal>().map_err(|_| BudgetError::Corrupt {
            key: key.to_string(),
            value: s,
        }),
        None => Ok(Decimal::ZERO),
    }
}

pub fn set_decimal(conn: &Connection, key: &str, value: Decimal) -> Result<()> {
    set(conn, key, &value.to_string())
}

pub fn load(conn: &Connection) -> Result<Settings> {
    let last_recurring_processed = match get(conn, KEY_LAST_PROCESSED)? {
        Some(s) => Some(NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|_| {
            BudgetError::Corrupt {
                key: KEY_LAST_PROCESSED.to_string(),
                value: s.clone(),
            }
        })?),
        None => None,
    };
    Ok(Settings {
        monthly_budget: get_decimal(conn, KEY_BUDGET)?,
        currency_symbol: get_string(conn, KEY_CURRENCY_SYMBOL, "$")?,
        pin_code: get_string(conn, KEY_PIN_CODE, "")?,
        profile: Profile {
            name: get_string(conn, KEY_USER_NAME, "")?,
            phone: get_string(conn, KEY_USER_PHONE, "")?,
            email: get_string(conn, KEY_USER_EMAIL, "")?,
            college: get_string(conn, KEY_USER_COLLEGE, "")?,
            course: get_string(conn, KEY_USER_COURSE, "")?,
        },
        profile_image: get_string(conn, KEY_PROFILE_IMAGE, "")?,
        last_recurring_processed,
    })
}

pub fn monthly_budget(conn: &Connection) -> Result<Decimal> {
    get_decimal(conn, KEY_BUDGET)
}

pub fn set_monthly_budget(conn: &Connection, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(BudgetError::Validation(format!(
            "Monthly budget must not be negative (got {})",
            value
        )));
    }
    set_decimal(conn, KEY_BUDGET, value)
}

pub fn set_currency_symbol(conn: &Connection, symbol: &str) -> Result<()> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(BudgetError::Validation(
            "Currency symbol must not be empty".into(),
        ));
    }
    set(conn, KEY_CURRENCY_SYMBOL, symbol)
}

/// An empty PIN disables the lock; anything else must be four digits.
pub fn set_pin(conn: &Connection, pin: &str) -> Result<()> {
    if !pin.is_empty() && !PIN_RE.is_match(pin) {
        return Err(BudgetError::Validation("PIN must be exactly 4 digits".into()));
    }
    set(conn, KEY_PIN_CODE, pin)
}

pub fn verify_pin(conn: &Connection, entered: &str) -> Result<bool> {
    let pin = get_string(conn, KEY_PIN_CODE, "")?;
    Ok(pin.is_empty() || pin == entered)
}

pub fn set_profile(conn: &Connection, profile: &Profile) -> Result<()> {
    set(conn, KEY_USER_NAME, &profile.name)?;
    set(conn, KEY_USER_PHONE, &profile.phone)?;
    set(conn, KEY_USER_EMAIL, &profile.email)?;
    set(conn, KEY_USER_COLLEGE, &profile.college)?;
    set(conn, KEY_USER_COURSE, &profile.course)?;
    Ok(())
}

pub fn set_profile_image(conn: &Connection, reference: &str) -> Result<()> {
    set(conn, KEY_PROFILE_IMAGE, reference)
}

pub fn set_last_recurring_processed(conn: &Connection, date: NaiveDate) -> Result<()> {
    set(conn, KEY_LAST_PROCESSED, &date.format(DATE_FORMAT).to_string())
}

pub fn reset(conn: &Connection) -> Result<()> {
    conn.execute("DELETE FROM settings", [])?;
    Ok(())
}

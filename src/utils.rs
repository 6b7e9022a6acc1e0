// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::Once;

use crate::models::DATE_FORMAT;

pub const NOTE_MAX_CHARS: usize = 60;

static TRACING_INIT: Once = Once::new();

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month regex"));

/// Installs the global tracing subscriber once. `RUST_LOG` overrides the
/// default `studentbudget=warn`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("studentbudget=warn"));

        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    if !MONTH_RE.is_match(s) {
        return Err(anyhow!("Invalid month '{}', expected YYYY-MM", s));
    }
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Entry-form rule: amounts must be numbers greater than zero.
pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d <= Decimal::ZERO {
        return Err(anyhow!("Please enter a valid amount greater than 0 (got {})", s));
    }
    Ok(d)
}

pub fn parse_non_negative(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d < Decimal::ZERO {
        return Err(anyhow!("Value must not be negative (got {})", s));
    }
    Ok(d)
}

pub fn validate_note(note: &str) -> Result<String> {
    if note.chars().count() > NOTE_MAX_CHARS {
        return Err(anyhow!("Note is limited to {} characters", NOTE_MAX_CHARS));
    }
    Ok(note.to_string())
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(headers.iter().copied().map(Cell::new));
    rows.into_iter().for_each(|row| {
        table.add_row(row.into_iter().map(Cell::new));
    });
    table
}

/// Prints `value` for `--json` / `--jsonl` and reports whether it did.
/// Lists go out one record per line under `--jsonl`.
pub fn maybe_print_json<T: serde::Serialize>(json: bool, jsonl: bool, value: &T) -> Result<bool> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else if jsonl {
        match serde_json::to_value(value)? {
            serde_json::Value::Array(items) => {
                for item in &items {
                    println!("{}", serde_json::to_string(item)?);
                }
            }
            other => println!("{}", serde_json::to_string(&other)?),
        }
    } else {
        return Ok(false);
    }
    Ok(true)
}

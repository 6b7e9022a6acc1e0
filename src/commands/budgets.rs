// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::month_or_current;
use crate::aggregate::{budget_usage, expenses_only, total};
use crate::app::Budget;
use crate::utils::{fmt_money, maybe_print_json, parse_non_negative, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(budget, sub)?,
        Some(("status", sub)) => status(budget, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_non_negative(sub.get_one::<String>("amount").unwrap())?;
    budget.set_monthly_budget(amount)?;
    if amount.is_zero() {
        println!("Monthly budget cleared");
    } else {
        let symbol = budget.settings()?.currency_symbol;
        println!("Monthly budget set to {}", fmt_money(&amount, &symbol));
    }
    Ok(())
}

fn status(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let settings = budget.settings()?;
    let spent = total(&expenses_only(&budget.transactions_in_month(&month)?));
    let usage = budget_usage(spent, settings.monthly_budget);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &usage)? {
        return Ok(());
    }
    let symbol = &settings.currency_symbol;
    let (budget_cell, remaining_cell, pct_cell) = if usage.is_set() {
        (
            fmt_money(&usage.budget, symbol),
            fmt_money(&usage.remaining, symbol),
            format!("{:.0}%", (usage.fraction * Decimal::ONE_HUNDRED).round()),
        )
    } else {
        ("—".to_string(), "—".to_string(), "—".to_string())
    };
    println!(
        "{}",
        pretty_table(
            &["Month", "Budget", "Spent", "Remaining", "Used"],
            vec![vec![
                month,
                budget_cell,
                fmt_money(&usage.spent, symbol),
                remaining_cell,
                pct_cell,
            ]],
        )
    );
    if usage.over_budget() {
        println!("Over budget by {}", fmt_money(&(usage.spent - usage.budget), symbol));
    }
    Ok(())
}

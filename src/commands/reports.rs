// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::month_or_current;
use crate::aggregate::{
    average_daily_spend, category_totals, daily_target, daily_totals, expenses_only, streak,
};
use crate::app::Budget;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, today};
use anyhow::{Context, Result};
use rust_decimal::Decimal;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(budget, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(budget, sub)?,
        Some(("calendar", sub)) => calendar(budget, sub)?,
        Some(("average", sub)) => average(budget, sub)?,
        Some(("streak", _)) => show_streak(budget)?,
        _ => {}
    }
    Ok(())
}

fn summary(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let dash = budget.dashboard(today())?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dash)? {
        return Ok(());
    }
    let symbol = budget.settings()?.currency_symbol;
    let money = |d: &Decimal| fmt_money(d, &symbol);
    let budget_cell = if dash.usage.is_set() {
        format!("{} left of {}", money(&dash.usage.remaining), money(&dash.usage.budget))
    } else {
        "—".to_string()
    };
    let rows = vec![
        vec!["Balance".to_string(), money(&dash.balance)],
        vec![format!("Spent ({})", dash.month), money(&dash.summary.expense)],
        vec![format!("Income ({})", dash.month), money(&dash.summary.income)],
        vec!["Budget".to_string(), budget_cell],
        vec!["Avg / day".to_string(), money(&dash.average_daily)],
        vec!["Streak".to_string(), format!("{} days", dash.streak_days)],
        vec!["Days left".to_string(), dash.days_left.to_string()],
    ];
    println!("{}", pretty_table(&["", ""], rows));
    if dash.goal_achieved {
        println!("🏆 Goal achieved: you're keeping spending under 80% of your budget this month");
    }

    let registry = budget.registry()?;
    if !dash.recent.is_empty() {
        let recent = dash
            .recent
            .iter()
            .map(|t| {
                vec![
                    t.date.clone(),
                    format!(
                        "{} {}",
                        registry.resolve_icon(&t.category),
                        registry.resolve_label(&t.category)
                    ),
                    format!("{}{}", if t.is_expense() { "-" } else { "+" }, money(&t.amount)),
                    t.note.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Category", "Amount", "Note"], recent));
    }
    Ok(())
}

fn spend_by_category(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let expenses = expenses_only(&budget.transactions_in_month(&month)?);
    let totals = category_totals(&expenses);
    let registry = budget.registry()?;
    let symbol = budget.settings()?.currency_symbol;
    let data: Vec<Vec<String>> = totals
        .iter()
        .map(|(key, amt)| {
            vec![
                format!("{} {}", registry.resolve_icon(key), registry.resolve_label(key)),
                fmt_money(amt, &symbol),
            ]
        })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn calendar(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let (y, m) = month.split_once('-').context("Month must look like YYYY-MM")?;
    let year: i32 = y.parse()?;
    let mon: u32 = m.parse()?;
    let expenses = expenses_only(&budget.transactions_in_month(&month)?);
    let per_day = daily_totals(&expenses, year, mon);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &per_day)? {
        return Ok(());
    }
    let symbol = budget.settings()?.currency_symbol;
    let rows = per_day
        .iter()
        .map(|(day, amt)| vec![format!("{}-{:02}", month, day), fmt_money(amt, &symbol)])
        .collect();
    println!("{}", pretty_table(&["Day", "Spent"], rows));
    Ok(())
}

fn average(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_or_current(sub)?;
    let avg = average_daily_spend(&budget.transactions_in_month(&month)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &avg)? {
        let symbol = budget.settings()?.currency_symbol;
        println!("Average daily spending for {}: {}", month, fmt_money(&avg, &symbol));
    }
    Ok(())
}

fn show_streak(budget: &mut Budget) -> Result<()> {
    let now = today();
    let target = daily_target(budget.settings()?.monthly_budget, now);
    if target.is_none() {
        println!("Set a monthly budget to start a streak");
        return Ok(());
    }
    let days = streak(now, target, &budget.transactions()?);
    println!("🔥 {} days under your daily target", days);
    Ok(())
}

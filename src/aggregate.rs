// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only sums and averages over a transaction snapshot.
//!
//! Records with dates that do not parse are left out of date-based figures
//! instead of failing the whole computation.

use crate::models::{DATE_FORMAT, Transaction, TxKind};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Longest streak ever reported, in days.
pub const STREAK_CAP: u32 = 365;

/// `yyyy-MM` for a date, the key used for month matching.
pub fn month_prefix(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn month_filter(list: &[Transaction], year_month: &str) -> Vec<Transaction> {
    list.iter()
        .filter(|t| t.date.starts_with(year_month))
        .cloned()
        .collect()
}

pub fn of_kind(list: &[Transaction], kind: TxKind) -> Vec<Transaction> {
    list.iter().filter(|t| t.r#type == kind).cloned().collect()
}

pub fn expenses_only(list: &[Transaction]) -> Vec<Transaction> {
    of_kind(list, TxKind::Expense)
}

pub fn total(list: &[Transaction]) -> Decimal {
    list.iter().map(|t| t.amount).sum()
}

/// Sum of `amount` per category over the given list, largest first. Equal
/// totals keep the order in which their category first appeared.
pub fn category_totals(list: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for t in list {
        match index.get(t.category.as_str()) {
            Some(&i) => totals[i].1 += t.amount,
            None => {
                index.insert(t.category.as_str(), totals.len());
                totals.push((t.category.clone(), t.amount));
            }
        }
    }
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// Expense total divided by the inclusive number of days between the
/// earliest and latest parseable expense dates. Zero when no date parses.
pub fn average_daily_spend(list: &[Transaction]) -> Decimal {
    let expenses = expenses_only(list);
    if expenses.is_empty() {
        return Decimal::ZERO;
    }
    let dates: Vec<NaiveDate> = expenses.iter().filter_map(|t| t.parsed_date()).collect();
    let span = match (dates.iter().min(), dates.iter().max()) {
        (Some(earliest), Some(latest)) => (*latest - *earliest).num_days() + 1,
        _ => return Decimal::ZERO,
    };
    total(&expenses) / Decimal::from(span.max(1))
}

/// Per-day-of-month sums for one month. Callers filter by type first if
/// they want only one kind.
pub fn daily_totals(list: &[Transaction], year: i32, month: u32) -> BTreeMap<u32, Decimal> {
    let mut out = BTreeMap::new();
    for t in list {
        let Some(date) = t.parsed_date() else {
            continue;
        };
        if date.year() != year || date.month() != month {
            continue;
        }
        *out.entry(date.day()).or_insert(Decimal::ZERO) += t.amount;
    }
    out
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(ny, nm, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 30,
    }
}

pub fn days_left_in_month(today: NaiveDate) -> u32 {
    days_in_month(today.year(), today.month()) - today.day()
}

/// Monthly budget spread evenly over the days of `today`'s month. None when
/// no budget is set.
pub fn daily_target(monthly_budget: Decimal, today: NaiveDate) -> Option<Decimal> {
    if monthly_budget <= Decimal::ZERO {
        return None;
    }
    Some(monthly_budget / Decimal::from(days_in_month(today.year(), today.month())))
}

/// Consecutive days, counting back from `today` inclusive, whose expense
/// total stayed at or under `daily_target`.
pub fn streak(today: NaiveDate, daily_target: Option<Decimal>, list: &[Transaction]) -> u32 {
    let Some(target) = daily_target else {
        return 0;
    };
    let mut per_day: HashMap<&str, Decimal> = HashMap::new();
    for t in list.iter().filter(|t| t.is_expense()) {
        *per_day.entry(t.date.as_str()).or_insert(Decimal::ZERO) += t.amount;
    }
    let mut count = 0;
    let mut day = today;
    while count < STREAK_CAP {
        let key = day.format(DATE_FORMAT).to_string();
        let spent = per_day.get(key.as_str()).copied().unwrap_or(Decimal::ZERO);
        if spent > target {
            break;
        }
        count += 1;
        day = day - Duration::days(1);
    }
    count
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetUsage {
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// spent / budget; zero when no budget is set.
    pub fraction: Decimal,
}

impl BudgetUsage {
    pub fn is_set(&self) -> bool {
        self.budget > Decimal::ZERO
    }

    pub fn over_budget(&self) -> bool {
        self.is_set() && self.spent >= self.budget
    }

    /// Month goal: a budget is set and at most 80% of it has been spent.
    pub fn within_goal(&self) -> bool {
        self.is_set() && self.spent <= self.budget * Decimal::new(8, 1)
    }
}

pub fn budget_usage(spent: Decimal, budget: Decimal) -> BudgetUsage {
    let fraction = if budget > Decimal::ZERO {
        spent / budget
    } else {
        Decimal::ZERO
    };
    BudgetUsage {
        budget,
        spent,
        remaining: (budget - spent).max(Decimal::ZERO),
        fraction,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
    pub count: usize,
}

pub fn month_summary(list: &[Transaction]) -> MonthSummary {
    let income = total(&of_kind(list, TxKind::Income));
    let expense = total(&expenses_only(list));
    MonthSummary {
        income,
        expense,
        net: income - expense,
        count: list.len(),
    }
}

/// Lifetime figures shown on the profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LifetimeStats {
    pub total_spent: Decimal,
    pub transaction_count: usize,
}

pub fn lifetime_stats(list: &[Transaction]) -> LifetimeStats {
    LifetimeStats {
        total_spent: total(&expenses_only(list)),
        transaction_count: list.len(),
    }
}

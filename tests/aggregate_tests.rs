// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use studentbudget::aggregate::{
    STREAK_CAP, average_daily_spend, budget_usage, category_totals, daily_target, daily_totals,
    days_in_month, days_left_in_month, lifetime_stats, month_summary, streak, total,
};
use studentbudget::models::{RecurringInterval, Transaction, TxKind};

fn tx(id: i64, amount: &str, category: &str, date: &str, kind: TxKind) -> Transaction {
    Transaction {
        id,
        amount: amount.parse().unwrap(),
        category: category.to_string(),
        note: String::new(),
        date: date.to_string(),
        r#type: kind,
        recurring_interval: RecurringInterval::None,
        payment_method: "Cash".to_string(),
    }
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn category_totals_largest_first() {
    let list = vec![
        tx(1, "30", "FOOD", "2024-01-02", TxKind::Expense),
        tx(2, "10", "TRANSPORT", "2024-01-03", TxKind::Expense),
        tx(3, "20", "FOOD", "2024-01-04", TxKind::Expense),
    ];
    let totals = category_totals(&list);
    assert_eq!(
        totals,
        vec![("FOOD".to_string(), d("50")), ("TRANSPORT".to_string(), d("10"))]
    );
    let sum: Decimal = totals.iter().map(|(_, v)| *v).sum();
    assert_eq!(sum, total(&list));
}

#[test]
fn category_totals_ties_keep_first_seen() {
    let list = vec![
        tx(1, "5", "RENT", "2024-01-02", TxKind::Expense),
        tx(2, "5", "FOOD", "2024-01-03", TxKind::Expense),
    ];
    let keys: Vec<String> = category_totals(&list).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["RENT", "FOOD"]);
}

#[test]
fn average_spans_inclusive_days() {
    let list = vec![
        tx(1, "10", "FOOD", "2024-01-01", TxKind::Expense),
        tx(2, "20", "FOOD", "2024-01-03", TxKind::Expense),
        tx(3, "500", "JOB", "2024-01-09", TxKind::Income),
    ];
    assert_eq!(average_daily_spend(&list), d("10"));
    assert_eq!(average_daily_spend(&[]), Decimal::ZERO);
}

#[test]
fn average_single_day_and_bad_dates() {
    let one = vec![tx(1, "7", "FOOD", "2024-01-01", TxKind::Expense)];
    assert_eq!(average_daily_spend(&one), d("7"));

    let bad = vec![tx(1, "9", "FOOD", "someday", TxKind::Expense)];
    assert_eq!(average_daily_spend(&bad), Decimal::ZERO);

    let mixed = vec![
        tx(1, "9", "FOOD", "someday", TxKind::Expense),
        tx(2, "3", "FOOD", "2024-01-01", TxKind::Expense),
    ];
    assert_eq!(average_daily_spend(&mixed), d("12"));
}

#[test]
fn daily_totals_groups_by_day_of_month() {
    let list = vec![
        tx(1, "3", "FOOD", "2024-01-05", TxKind::Expense),
        tx(2, "4", "FOOD", "2024-01-05", TxKind::Expense),
        tx(3, "8", "FOOD", "2024-01-20", TxKind::Expense),
        tx(4, "1", "FOOD", "2024-02-05", TxKind::Expense),
        tx(5, "1", "FOOD", "garbage", TxKind::Expense),
    ];
    let per_day = daily_totals(&list, 2024, 1);
    assert_eq!(per_day.len(), 2);
    assert_eq!(per_day[&5], d("7"));
    assert_eq!(per_day[&20], d("8"));
}

#[test]
fn month_lengths() {
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2023, 2), 28);
    assert_eq!(days_in_month(2024, 12), 31);
    assert_eq!(days_left_in_month(day("2024-04-10")), 20);
    assert_eq!(days_left_in_month(day("2024-04-30")), 0);
}

#[test]
fn daily_target_needs_a_budget() {
    assert_eq!(daily_target(d("310"), day("2024-01-15")), Some(d("10")));
    assert_eq!(daily_target(Decimal::ZERO, day("2024-01-15")), None);
}

#[test]
fn streak_stops_at_first_day_over_target() {
    let list = vec![
        tx(1, "5", "FOOD", "2024-01-10", TxKind::Expense),
        tx(2, "15", "FOOD", "2024-01-08", TxKind::Expense),
        tx(3, "200", "JOB", "2024-01-09", TxKind::Income),
    ];
    assert_eq!(streak(day("2024-01-10"), Some(d("10")), &list), 2);
    assert_eq!(streak(day("2024-01-10"), None, &list), 0);
}

#[test]
fn streak_is_capped() {
    assert_eq!(streak(day("2024-06-01"), Some(d("1")), &[]), STREAK_CAP);
}

#[test]
fn budget_usage_fraction_and_remaining() {
    let u = budget_usage(d("45"), d("50"));
    assert_eq!(u.fraction, d("0.9"));
    assert_eq!(u.remaining, d("5"));
    assert!(!u.over_budget());

    let over = budget_usage(d("60"), d("50"));
    assert_eq!(over.remaining, Decimal::ZERO);
    assert!(over.over_budget());

    assert!(!budget_usage(d("60"), Decimal::ZERO).is_set());
}

#[test]
fn month_summary_splits_kinds() {
    let list = vec![
        tx(1, "12", "FOOD", "2024-01-02", TxKind::Expense),
        tx(2, "100", "JOB", "2024-01-03", TxKind::Income),
    ];
    let s = month_summary(&list);
    assert_eq!(s.income, d("100"));
    assert_eq!(s.expense, d("12"));
    assert_eq!(s.net, d("88"));
    assert_eq!(s.count, 2);
}

#[test]
fn goal_needs_budget_and_headroom() {
    assert!(budget_usage(d("80"), d("100")).within_goal());
    assert!(!budget_usage(d("80.01"), d("100")).within_goal());
    assert!(!budget_usage(Decimal::ZERO, Decimal::ZERO).within_goal());
}

#[test]
fn lifetime_stats_count_everything_but_sum_expenses() {
    let list = vec![
        tx(1, "12", "FOOD", "2023-11-02", TxKind::Expense),
        tx(2, "100", "JOB", "2024-01-03", TxKind::Income),
        tx(3, "8", "RENT", "2024-02-03", TxKind::Expense),
    ];
    let stats = lifetime_stats(&list);
    assert_eq!(stats.total_spent, d("20"));
    assert_eq!(stats.transaction_count, 3);
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use studentbudget::{
    Budget, cli, commands, db,
    models::{CategoryEntry, NewTransaction, TxKind},
    observe::Change,
};

fn setup() -> Budget {
    Budget::new(db::open_in_memory().unwrap())
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn fresh_store_has_defaults() {
    let s = setup().settings().unwrap();
    assert_eq!(s.monthly_budget, Decimal::ZERO);
    assert_eq!(s.currency_symbol, "$");
    assert!(s.pin_code.is_empty());
    assert!(s.last_recurring_processed.is_none());
}

#[test]
fn budget_and_currency_validation() {
    let mut b = setup();
    assert!(b.set_monthly_budget("-1".parse().unwrap()).is_err());
    assert!(b.set_currency_symbol("  ").is_err());
    b.set_monthly_budget("300".parse().unwrap()).unwrap();
    b.set_currency_symbol("€").unwrap();
    let s = b.settings().unwrap();
    assert_eq!(s.monthly_budget, "300".parse::<Decimal>().unwrap());
    assert_eq!(s.currency_symbol, "€");
}

#[test]
fn pin_must_be_four_digits() {
    let mut b = setup();
    assert!(b.verify_pin("anything").unwrap());
    for bad in ["123", "12345", "12a4", " 1234"] {
        assert!(b.set_pin(bad).is_err(), "{bad} accepted");
    }
    b.set_pin("0420").unwrap();
    assert!(b.verify_pin("0420").unwrap());
    assert!(!b.verify_pin("0000").unwrap());
    b.set_pin("").unwrap();
    assert!(b.verify_pin("0000").unwrap());
}

#[test]
fn recurring_marker_only_moves_forward() {
    let mut b = setup();
    assert!(b.process_recurring(day(2024, 3, 1)).unwrap());
    assert!(!b.process_recurring(day(2024, 3, 1)).unwrap());
    assert!(!b.process_recurring(day(2024, 2, 28)).unwrap());
    assert!(b.process_recurring(day(2024, 3, 2)).unwrap());
    assert_eq!(
        b.settings().unwrap().last_recurring_processed,
        Some(day(2024, 3, 2))
    );
}

#[test]
fn factory_reset_erases_everything() {
    let mut b = setup();
    b.set_balance("40".parse().unwrap()).unwrap();
    b.add_transaction(&NewTransaction::expense(Decimal::TEN, "FOOD", "2024-01-01"))
        .unwrap();
    b.save_category(&CategoryEntry {
        key: "GYM".into(),
        icon: "🏋️".into(),
        label: "Gym".into(),
        r#type: TxKind::Expense,
    })
    .unwrap();
    b.set_currency_symbol("£").unwrap();
    let rx = b.subscribe();

    let m = cli::build_cli().get_matches_from(["studentbudget", "reset"]);
    let (_, sub) = m.subcommand().unwrap();
    assert!(commands::settings::reset(&mut b, sub).is_err());
    assert_eq!(b.transactions().unwrap().len(), 1);

    let m = cli::build_cli().get_matches_from(["studentbudget", "reset", "--yes"]);
    let (_, sub) = m.subcommand().unwrap();
    commands::settings::reset(&mut b, sub).unwrap();

    assert!(b.transactions().unwrap().is_empty());
    assert!(b.registry().unwrap().custom().is_empty());
    assert_eq!(b.balance().unwrap(), Decimal::ZERO);
    assert_eq!(b.settings().unwrap().currency_symbol, "$");
    assert_eq!(rx.try_recv().unwrap(), Change::Reset);
}

#[test]
fn profile_set_merges_fields() {
    let mut b = setup();
    let m = cli::build_cli()
        .get_matches_from(["studentbudget", "profile", "set", "--name", "Ravi"]);
    let (_, sub) = m.subcommand().unwrap();
    commands::profile::handle(&mut b, sub).unwrap();

    let m = cli::build_cli()
        .get_matches_from(["studentbudget", "profile", "set", "--course", "Physics"]);
    let (_, sub) = m.subcommand().unwrap();
    commands::profile::handle(&mut b, sub).unwrap();

    let p = b.settings().unwrap().profile;
    assert_eq!(p.name, "Ravi");
    assert_eq!(p.course, "Physics");
    assert!(p.email.is_empty());
}

#[test]
fn unlock_rejects_wrong_pin() {
    let mut b = setup();
    b.set_pin("1234").unwrap();
    let m = cli::build_cli().get_matches_from(["studentbudget", "settings", "unlock", "--pin", "9999"]);
    let (_, sub) = m.subcommand().unwrap();
    assert!(commands::settings::handle(&mut b, sub).is_err());
}

#[test]
fn dashboard_goal_achieved() {
    let mut b = setup();
    let today = day(2024, 5, 20);
    assert!(!b.dashboard(today).unwrap().goal_achieved);

    b.set_monthly_budget("100".parse().unwrap()).unwrap();
    assert!(!b.dashboard(today).unwrap().goal_achieved);

    b.add_transaction(&NewTransaction::expense("80".parse().unwrap(), "FOOD", "2024-05-10"))
        .unwrap();
    assert!(b.dashboard(today).unwrap().goal_achieved);

    b.add_transaction(&NewTransaction::expense(Decimal::ONE, "FOOD", "2024-05-11"))
        .unwrap();
    assert!(!b.dashboard(today).unwrap().goal_achieved);
}

#[test]
fn profile_view_includes_lifetime_stats() {
    let mut b = setup();
    b.add_transaction(&NewTransaction::expense("12.5".parse().unwrap(), "FOOD", "2023-09-01"))
        .unwrap();
    b.add_transaction(&NewTransaction::income("40".parse().unwrap(), "JOB", "2024-01-01"))
        .unwrap();
    let view = commands::profile::profile_view(&b).unwrap();
    assert_eq!(view.stats.total_spent, "12.5".parse::<Decimal>().unwrap());
    assert_eq!(view.stats.transaction_count, 2);

    let json: serde_json::Value = serde_json::to_value(&view).unwrap();
    assert_eq!(json["transaction_count"], 2);
}

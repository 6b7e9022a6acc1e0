// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use studentbudget::{
    Budget, balance, db,
    models::{NewTransaction, TxKind},
    observe::Change,
};

fn setup() -> Budget {
    Budget::new(db::open_in_memory().unwrap())
}

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn expense_on_empty_balance_is_floored_then_deleting_keeps_income() {
    let mut b = setup();
    let food = b
        .add_transaction(&NewTransaction::expense(d("50"), "FOOD", "2024-01-15"))
        .unwrap();
    assert_eq!(b.balance().unwrap(), Decimal::ZERO);

    b.add_transaction(&NewTransaction::income(d("100"), "JOB", "2024-01-16"))
        .unwrap();
    assert_eq!(b.balance().unwrap(), d("100"));

    assert!(b.delete_transaction(food).unwrap());
    assert_eq!(b.balance().unwrap(), d("100"));
}

#[test]
fn delete_reverses_add() {
    let mut b = setup();
    b.set_balance(d("80")).unwrap();
    let id = b
        .add_transaction(&NewTransaction::expense(d("12.50"), "FOOD", "2024-03-02"))
        .unwrap();
    assert_eq!(b.balance().unwrap(), d("67.50"));
    b.delete_transaction(id).unwrap();
    assert_eq!(b.balance().unwrap(), d("80"));

    let id = b
        .add_transaction(&NewTransaction::income(d("20"), "ALLOWANCE", "2024-03-03"))
        .unwrap();
    assert_eq!(b.balance().unwrap(), d("100"));
    b.delete_transaction(id).unwrap();
    assert_eq!(b.balance().unwrap(), d("80"));
}

#[test]
fn pure_arithmetic_never_goes_negative() {
    for (start, amt) in [("0", "5"), ("3", "10"), ("10", "10"), ("2.5", "0.01")] {
        let tx = NewTransaction::expense(d(amt), "FOOD", "2024-01-01");
        let applied = balance::add(d(start), &tx);
        assert!(applied.balance >= Decimal::ZERO);
        assert_eq!(applied.balance - d(start), applied.effect);
    }
    assert_eq!(
        balance::apply_removed(d("5"), d("10"), TxKind::Income),
        Decimal::ZERO
    );
}

#[test]
fn edit_rebalances_once() {
    let mut b = setup();
    b.set_balance(d("100")).unwrap();
    let id = b
        .add_transaction(&NewTransaction::expense(d("30"), "FOOD", "2024-02-10"))
        .unwrap();
    assert_eq!(b.balance().unwrap(), d("70"));

    let rx = b.subscribe();
    let changed = b
        .update_transaction(id, &NewTransaction::expense(d("45"), "FOOD", "2024-02-10"))
        .unwrap();
    assert!(changed);
    assert_eq!(b.balance().unwrap(), d("55"));

    let events: Vec<Change> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![Change::Transactions, Change::Balance(d("55"))]
    );
}

#[test]
fn edit_switching_kind_moves_balance_both_ways() {
    let mut b = setup();
    b.set_balance(d("50")).unwrap();
    let id = b
        .add_transaction(&NewTransaction::expense(d("20"), "OTHER", "2024-02-10"))
        .unwrap();
    b.update_transaction(id, &NewTransaction::income(d("20"), "OTHER", "2024-02-10"))
        .unwrap();
    assert_eq!(b.balance().unwrap(), d("70"));
}

#[test]
fn missing_ids_are_no_ops() {
    let mut b = setup();
    b.set_balance(d("10")).unwrap();
    let rx = b.subscribe();
    assert!(!b.delete_transaction(999).unwrap());
    assert!(!b
        .update_transaction(999, &NewTransaction::expense(d("1"), "FOOD", "2024-01-01"))
        .unwrap());
    assert_eq!(b.balance().unwrap(), d("10"));
    assert!(rx.try_recv().is_err());
}

#[test]
fn set_balance_floors_negative_override() {
    let mut b = setup();
    assert_eq!(b.set_balance(d("-4")).unwrap(), Decimal::ZERO);
    assert_eq!(b.balance().unwrap(), Decimal::ZERO);
}

#[test]
fn dropped_subscribers_are_forgotten() {
    let mut b = setup();
    let rx = b.subscribe();
    drop(rx);
    let live = b.subscribe();
    b.set_balance(d("5")).unwrap();
    assert_eq!(live.try_recv().unwrap(), Change::Balance(d("5")));
}

#[test]
fn raising_income_on_low_balance_floors_once() {
    let mut b = setup();
    let income = b
        .add_transaction(&NewTransaction::income(d("20"), "JOB", "2024-04-01"))
        .unwrap();
    b.add_transaction(&NewTransaction::expense(d("15"), "FOOD", "2024-04-02"))
        .unwrap();
    assert_eq!(b.balance().unwrap(), d("5"));

    b.update_transaction(income, &NewTransaction::income(d("25"), "JOB", "2024-04-01"))
        .unwrap();
    assert_eq!(b.balance().unwrap(), d("10"));

    b.delete_transaction(income).unwrap();
    assert_eq!(b.balance().unwrap(), Decimal::ZERO);
}

#[test]
fn edit_arithmetic_has_no_intermediate_floor() {
    let mut b = setup();
    let id = b
        .add_transaction(&NewTransaction::income(d("20"), "JOB", "2024-04-01"))
        .unwrap();
    let (old, effect) = studentbudget::transactions::get_with_effect(b.connection(), id)
        .unwrap()
        .unwrap();
    let applied = balance::apply_edited(
        d("5"),
        &old,
        effect,
        &NewTransaction::income(d("25"), "JOB", "2024-04-01"),
    );
    assert_eq!(applied.balance, d("10"));
    assert_eq!(applied.effect, d("25"));
}

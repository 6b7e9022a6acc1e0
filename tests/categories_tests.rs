// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use studentbudget::{
    Budget, cli,
    categories::{self, BUILTIN, CategoryRegistry},
    commands, db,
    models::{CategoryEntry, NewTransaction, TxKind},
};

fn setup() -> Budget {
    Budget::new(db::open_in_memory().unwrap())
}

fn entry(key: &str, icon: &str, label: &str) -> CategoryEntry {
    CategoryEntry {
        key: key.to_string(),
        icon: icon.to_string(),
        label: label.to_string(),
        r#type: TxKind::Expense,
    }
}

#[test]
fn unknown_keys_resolve_to_other() {
    let reg = CategoryRegistry::default();
    assert_eq!(reg.resolve_label("NOPE"), "Other");
    assert_eq!(reg.resolve_icon("NOPE"), "📦");
    assert_eq!(reg.resolve_label("food"), "Food");
}

#[test]
fn user_category_overrides_builtin() {
    let mut b = setup();
    b.save_category(&entry("FOOD", "🥗", "Groceries")).unwrap();
    b.save_category(&entry("GYM", "🏋️", "Gym")).unwrap();
    let reg = b.registry().unwrap();
    assert_eq!(reg.resolve_label("FOOD"), "Groceries");
    assert_eq!(reg.resolve_icon("GYM"), "🏋️");

    let choices = reg.choices();
    assert_eq!(choices.len(), BUILTIN.len() + 1);
    assert_eq!(choices[0].label, "Groceries");
    assert_eq!(choices.last().unwrap().key, "GYM");
}

#[test]
fn list_orders_by_label_and_upsert_replaces() {
    let b = setup();
    let conn = b.connection();
    categories::upsert(conn, &entry("Z", "z", "Zines")).unwrap();
    categories::upsert(conn, &entry("A", "a", "Arcade")).unwrap();
    categories::upsert(conn, &entry("Z", "z", "Books")).unwrap();
    let labels: Vec<String> = categories::list(conn)
        .unwrap()
        .into_iter()
        .map(|c| c.label)
        .collect();
    assert_eq!(labels, ["Arcade", "Books"]);
}

#[test]
fn empty_key_rejected() {
    let mut b = setup();
    assert!(b.save_category(&entry("  ", "x", "Blank")).is_err());
}

#[test]
fn removing_category_leaves_transactions() {
    let mut b = setup();
    b.save_category(&entry("GYM", "🏋️", "Gym")).unwrap();
    b.add_transaction(&NewTransaction::expense("15".parse().unwrap(), "GYM", "2024-01-02"))
        .unwrap();
    assert!(b.remove_category("GYM").unwrap());
    assert!(!b.remove_category("GYM").unwrap());

    let list = b.transactions().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].category, "GYM");
    assert_eq!(b.registry().unwrap().resolve_label("GYM"), "Other");
}

#[test]
fn cli_add_then_list_rows() {
    let mut b = setup();
    let matches = cli::build_cli().get_matches_from([
        "studentbudget", "category", "add", "--key", "TIPS", "--icon", "💵", "--label", "Tips",
        "--type", "income",
    ]);
    let (_, cat_m) = matches.subcommand().unwrap();
    commands::categories::handle(&mut b, cat_m).unwrap();

    let custom = b.registry().unwrap().custom().to_vec();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom[0].r#type, TxKind::Income);
}

#[test]
fn cli_list_renders_table_and_jsonl() {
    let mut b = setup();
    for args in [
        vec!["studentbudget", "category", "list"],
        vec!["studentbudget", "category", "list", "--jsonl"],
    ] {
        let matches = cli::build_cli().get_matches_from(args);
        let (_, cat_m) = matches.subcommand().unwrap();
        commands::categories::handle(&mut b, cat_m).unwrap();
    }
    let rows = commands::categories::category_rows(&b).unwrap();
    assert_eq!(rows.len(), BUILTIN.len());
    assert!(rows.iter().all(|r| r.source == "built-in"));
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::models::{
    DATE_FORMAT, DEFAULT_PAYMENT_METHOD, NewTransaction, PAYMENT_METHODS, RecurringInterval,
    Transaction, TxKind,
};
use crate::transactions::search;
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, parse_month, pretty_table, today,
    validate_note,
};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(budget, sub)?,
        Some(("edit", sub)) => edit(budget, sub)?,
        Some(("rm", sub)) => remove(budget, sub)?,
        Some(("list", sub)) => list(budget, sub)?,
        Some(("export", sub)) => export_transactions(budget, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds the record from flags, starting from `base` for anything omitted.
pub fn fields_from_args(sub: &clap::ArgMatches, base: Option<NewTransaction>) -> Result<NewTransaction> {
    let amount = match (sub.get_one::<String>("amount"), &base) {
        (Some(s), _) => parse_amount(s)?,
        (None, Some(b)) => b.amount,
        (None, None) => return Err(anyhow!("--amount is required")),
    };
    let category = match (sub.get_one::<String>("category"), &base) {
        (Some(s), _) if !s.trim().is_empty() => s.trim().to_string(),
        (_, Some(b)) => b.category.clone(),
        _ => return Err(anyhow!("--category is required")),
    };
    let date = match (sub.get_one::<String>("date"), &base) {
        (Some(s), _) => parse_date(s)?.format(DATE_FORMAT).to_string(),
        (None, Some(b)) => b.date.clone(),
        (None, None) => today().format(DATE_FORMAT).to_string(),
    };
    let note = match (sub.get_one::<String>("note"), &base) {
        (Some(s), _) => validate_note(s.trim())?,
        (None, Some(b)) => b.note.clone(),
        (None, None) => String::new(),
    };
    let r#type = match (sub.get_one::<String>("type"), &base) {
        (Some(s), _) => s.parse::<TxKind>()?,
        (None, Some(b)) => b.r#type,
        (None, None) => Default::default(),
    };
    let payment_method = match (sub.get_one::<String>("payment"), &base) {
        (Some(s), _) if !s.trim().is_empty() => PAYMENT_METHODS
            .iter()
            .find(|m| m.eq_ignore_ascii_case(s.trim()))
            .map(|m| m.to_string())
            .ok_or_else(|| {
                anyhow!(
                    "Unknown payment method '{}' (use {})",
                    s,
                    PAYMENT_METHODS.join(", ")
                )
            })?,
        (_, Some(b)) => b.payment_method.clone(),
        _ => DEFAULT_PAYMENT_METHOD.to_string(),
    };
    let recurring_interval = match (sub.get_one::<String>("recurring"), &base) {
        (Some(s), _) => s.parse::<RecurringInterval>()?,
        (None, Some(b)) => b.recurring_interval,
        (None, None) => Default::default(),
    };
    Ok(NewTransaction {
        amount,
        category,
        note,
        date,
        r#type,
        recurring_interval,
        payment_method,
    })
}

fn add(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let new = fields_from_args(sub, None)?;
    let id = budget.add_transaction(&new)?;
    let symbol = budget.settings()?.currency_symbol;
    println!(
        "Recorded {} {} in {} on {} (id {}). Balance: {}",
        new.r#type,
        fmt_money(&new.amount, &symbol),
        new.category,
        new.date,
        id,
        fmt_money(&budget.balance()?, &symbol)
    );
    Ok(())
}

fn edit(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let Some(existing) = budget.transaction(id)? else {
        println!("No transaction with id {}", id);
        return Ok(());
    };
    let new = fields_from_args(sub, Some(existing.fields()))?;
    budget.update_transaction(id, &new)?;
    println!("Updated transaction {}", id);
    Ok(())
}

fn remove(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if budget.delete_transaction(id)? {
        println!("Deleted transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn list(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(budget, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    format!("{} {}", r.icon, r.category),
                    r.payment_method.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Category", "Payment", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub category_key: String,
    pub category: String,
    pub icon: String,
    pub payment_method: String,
    pub note: String,
}

pub fn query_rows(budget: &Budget, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let list = match sub.get_one::<String>("month") {
        Some(month) => budget.transactions_in_month(&parse_month(month)?)?,
        None => budget.transactions()?,
    };
    let registry = budget.registry()?;
    let query = sub.get_one::<String>("search").map(|s| s.as_str()).unwrap_or("");
    let category = sub.get_one::<String>("category").map(|s| s.trim());
    let mut filtered = search(&list, query, category, &registry);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        filtered.truncate(*limit);
    }
    Ok(filtered
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.clone(),
            r#type: t.r#type.to_string(),
            amount: t.amount.to_string(),
            category: registry.resolve_label(&t.category),
            icon: registry.resolve_icon(&t.category),
            category_key: t.category,
            payment_method: t.payment_method,
            note: t.note,
        })
        .collect())
}

fn export_transactions(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }
    let rows: Vec<Transaction> = budget.transactions()?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "type", "amount", "category", "payment_method", "recurring", "note",
            ])?;
            for t in &rows {
                wtr.write_record([
                    t.date.as_str(),
                    t.r#type.as_str(),
                    t.amount.to_string().as_str(),
                    t.category.as_str(),
                    t.payment_method.as_str(),
                    t.recurring_interval.as_str(),
                    t.note.as_str(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}

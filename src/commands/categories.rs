// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::categories::BUILTIN;
use crate::models::{CategoryEntry, TxKind};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let entry = CategoryEntry {
                key: sub.get_one::<String>("key").unwrap().trim().to_string(),
                icon: sub.get_one::<String>("icon").unwrap().trim().to_string(),
                label: sub.get_one::<String>("label").unwrap().trim().to_string(),
                r#type: sub.get_one::<String>("type").unwrap().parse::<TxKind>()?,
            };
            budget.save_category(&entry)?;
            println!("Saved category {} {} ({})", entry.icon, entry.label, entry.key);
        }
        Some(("list", sub)) => {
            let data = category_rows(budget)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|r| vec![r.key, format!("{} {}", r.icon, r.label), r.r#type, r.source])
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Key", "Category", "Type", "Source"], rows)
                );
            }
        }
        Some(("rm", sub)) => {
            let key = sub.get_one::<String>("key").unwrap().trim();
            if budget.remove_category(key)? {
                println!("Removed category '{}'", key);
            } else {
                println!("No custom category '{}'", key);
            }
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CategoryRow {
    pub key: String,
    pub icon: String,
    pub label: String,
    pub r#type: String,
    pub source: String,
}

pub fn category_rows(budget: &Budget) -> Result<Vec<CategoryRow>> {
    let registry = budget.registry()?;
    Ok(registry
        .choices()
        .into_iter()
        .map(|c| {
            let custom = registry.custom().iter().any(|u| u.key == c.key);
            let source = match (custom, BUILTIN.iter().any(|b| b.key == c.key)) {
                (true, true) => "custom (overrides built-in)",
                (true, false) => "custom",
                _ => "built-in",
            };
            CategoryRow {
                key: c.key,
                icon: c.icon,
                label: c.label,
                r#type: c.r#type.to_string(),
                source: source.to_string(),
            }
        })
        .collect())
}

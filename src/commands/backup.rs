// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use anyhow::{Context, Result};
use std::fs;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("export", sub)) => {
            let out = sub.get_one::<String>("out").unwrap().trim();
            let json = budget.export_json()?;
            fs::write(out, json).with_context(|| format!("Write backup to {}", out))?;
            println!("Backup saved to {}", out);
        }
        Some(("import", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let json =
                fs::read_to_string(path).with_context(|| format!("Read backup {}", path))?;
            let summary = budget
                .import_json(&json)
                .with_context(|| format!("Restore from {} failed; existing data left unchanged", path))?;
            println!(
                "Restored {} transactions and {} categories from {}",
                summary.transactions, summary.categories, path
            );
        }
        _ => {}
    }
    Ok(())
}

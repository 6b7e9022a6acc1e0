// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::utils::{maybe_print_json, today};
use anyhow::Result;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    let insights = budget.insights(today())?;
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &insights)? {
        for insight in &insights {
            println!("{}", insight);
        }
    }
    Ok(())
}

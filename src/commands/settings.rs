// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use anyhow::{Result, anyhow};

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("currency", sub)) => {
            let symbol = sub.get_one::<String>("symbol").unwrap();
            budget.set_currency_symbol(symbol)?;
            println!("Currency symbol set to {}", symbol.trim());
        }
        Some(("pin", sub)) => {
            if sub.get_flag("clear") {
                budget.set_pin("")?;
                println!("PIN lock disabled");
            } else if let Some(pin) = sub.get_one::<String>("pin") {
                budget.set_pin(pin.trim())?;
                println!("PIN lock enabled");
            } else {
                return Err(anyhow!("Pass --pin <4 digits> or --clear"));
            }
        }
        Some(("unlock", sub)) => {
            let pin = sub.get_one::<String>("pin").unwrap();
            if budget.verify_pin(pin.trim())? {
                println!("Unlocked");
            } else {
                tracing::warn!("incorrect PIN entered");
                return Err(anyhow!("Incorrect PIN"));
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn reset(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        return Err(anyhow!(
            "Factory reset erases all data; re-run with --yes to confirm"
        ));
    }
    budget.factory_reset()?;
    println!("All data erased");
    Ok(())
}

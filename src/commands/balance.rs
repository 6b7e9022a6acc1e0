// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::utils::{fmt_money, parse_non_negative};
use anyhow::Result;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    let symbol = budget.settings()?.currency_symbol;
    match m.subcommand() {
        Some(("set", sub)) => {
            let amount = parse_non_negative(sub.get_one::<String>("amount").unwrap())?;
            let value = budget.set_balance(amount)?;
            println!("Balance set to {}", fmt_money(&value, &symbol));
        }
        _ => {
            println!("Balance: {}", fmt_money(&budget.balance()?, &symbol));
        }
    }
    Ok(())
}

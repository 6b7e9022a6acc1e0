// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use studentbudget::{Budget, cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_arg = matches.get_one::<String>("db").map(PathBuf::from);
    let conn = match &db_arg {
        Some(path) => db::open_at(path)?,
        None => db::open_or_init()?,
    };
    let mut budget = Budget::new(conn);
    budget.process_recurring(utils::today())?;

    match matches.subcommand() {
        Some(("init", _)) => {
            let path = match db_arg {
                Some(p) => p,
                None => db::db_path()?,
            };
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut budget, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut budget, sub)?,
        Some(("balance", sub)) => commands::balance::handle(&mut budget, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut budget, sub)?,
        Some(("report", sub)) => commands::reports::handle(&mut budget, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&mut budget, sub)?,
        Some(("backup", sub)) => commands::backup::handle(&mut budget, sub)?,
        Some(("profile", sub)) => commands::profile::handle(&mut budget, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut budget, sub)?,
        Some(("reset", sub)) => commands::settings::reset(&mut budget, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

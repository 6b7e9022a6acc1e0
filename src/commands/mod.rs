// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod transactions;
pub mod categories;
pub mod balance;
pub mod budgets;
pub mod reports;
pub mod insights;
pub mod backup;
pub mod profile;
pub mod settings;

use crate::aggregate::month_prefix;
use crate::utils::{parse_month, today};
use anyhow::Result;

/// `--month` if given, otherwise the current month.
pub(crate) fn month_or_current(sub: &clap::ArgMatches) -> Result<String> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(month_prefix(today())),
    }
}

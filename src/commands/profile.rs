// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::LifetimeStats;
use crate::app::Budget;
use crate::models::Profile;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    pub profile_image: String,
    #[serde(flatten)]
    pub stats: LifetimeStats,
}

pub fn profile_view(budget: &Budget) -> Result<ProfileView> {
    let settings = budget.settings()?;
    Ok(ProfileView {
        profile: settings.profile,
        profile_image: settings.profile_image,
        stats: budget.lifetime_stats()?,
    })
}

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let mut profile = budget.settings()?.profile;
            let field = |name: &str| sub.get_one::<String>(name).map(|s| s.trim().to_string());
            if let Some(v) = field("name") {
                profile.name = v;
            }
            if let Some(v) = field("phone") {
                profile.phone = v;
            }
            if let Some(v) = field("email") {
                profile.email = v;
            }
            if let Some(v) = field("college") {
                profile.college = v;
            }
            if let Some(v) = field("course") {
                profile.course = v;
            }
            budget.update_profile(&profile)?;
            println!("Profile updated");
        }
        Some(("image", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            budget.set_profile_image(path)?;
            println!("Profile image set to {}", path);
        }
        Some(("show", sub)) => {
            let view = profile_view(budget)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view)? {
                let symbol = budget.settings()?.currency_symbol;
                let p = view.profile;
                let rows = vec![
                    vec!["Name".to_string(), p.name],
                    vec!["Phone".to_string(), p.phone],
                    vec!["Email".to_string(), p.email],
                    vec!["College".to_string(), p.college],
                    vec!["Course".to_string(), p.course],
                    vec!["Image".to_string(), view.profile_image],
                    vec![
                        "Total spent".to_string(),
                        fmt_money(&view.stats.total_spent, &symbol),
                    ],
                    vec![
                        "Transactions".to_string(),
                        view.stats.transaction_count.to_string(),
                    ],
                ];
                println!("{}", pretty_table(&["Field", "Value"], rows));
            }
        }
        _ => {}
    }
    Ok(())
}

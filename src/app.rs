// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! `Budget` owns the database connection and is the only place state is
//! mutated. Every mutation commits in one SQLite transaction before any
//! subscriber hears about it.

use crate::aggregate::{self, BudgetUsage, LifetimeStats, MonthSummary};
use crate::backup::{self, BackupDocument, RestoreSummary};
use crate::balance;
use crate::categories::{self, CategoryRegistry};
use crate::error::Result;
use crate::insights::{self, Insight, InsightInputs};
use crate::models::{CategoryEntry, DATE_FORMAT, NewTransaction, Profile, Settings, Transaction};
use crate::observe::{Change, Observers};
use crate::settings;
use crate::transactions;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::mpsc::Receiver;
use tracing::{info, warn};

const RECENT_COUNT: usize = 5;

pub struct Budget {
    conn: Connection,
    observers: Observers,
}

/// Figures shown on the home screen for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub balance: Decimal,
    pub month: String,
    pub summary: MonthSummary,
    pub usage: BudgetUsage,
    /// Budget set, at most 80% used, and something recorded this month.
    pub goal_achieved: bool,
    pub average_daily: Decimal,
    pub streak_days: u32,
    pub days_left: u32,
    pub category_totals: Vec<(String, Decimal)>,
    pub recent: Vec<Transaction>,
}

impl Budget {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            observers: Observers::default(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn subscribe(&mut self) -> Receiver<Change> {
        self.observers.subscribe()
    }

    // ─── Transactions ───

    pub fn add_transaction(&mut self, new: &NewTransaction) -> Result<i64> {
        let tx = self.conn.transaction()?;
        let applied = balance::add(balance::load(&tx)?, new);
        let id = transactions::insert(&tx, new, Some(applied.effect))?;
        balance::store(&tx, applied.balance)?;
        tx.commit()?;
        info!(id, amount = %new.amount, kind = %new.r#type, balance = %applied.balance, "transaction added");
        self.observers.notify(Change::Transactions);
        self.observers.notify(Change::Balance(applied.balance));
        Ok(id)
    }

    /// Replaces row `id` and rebalances in one step. Returns false, changing
    /// nothing, when the row does not exist.
    pub fn update_transaction(&mut self, id: i64, new: &NewTransaction) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let Some((old, old_effect)) = transactions::get_with_effect(&tx, id)? else {
            return Ok(false);
        };
        let applied = balance::apply_edited(balance::load(&tx)?, &old, old_effect, new);
        transactions::update(&tx, id, new, Some(applied.effect))?;
        balance::store(&tx, applied.balance)?;
        tx.commit()?;
        info!(id, balance = %applied.balance, "transaction updated");
        self.observers.notify(Change::Transactions);
        self.observers.notify(Change::Balance(applied.balance));
        Ok(true)
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let Some((old, effect)) = transactions::get_with_effect(&tx, id)? else {
            return Ok(false);
        };
        let next = balance::remove(balance::load(&tx)?, &old, effect);
        transactions::delete(&tx, id)?;
        balance::store(&tx, next)?;
        tx.commit()?;
        info!(id, balance = %next, "transaction deleted");
        self.observers.notify(Change::Transactions);
        self.observers.notify(Change::Balance(next));
        Ok(true)
    }

    pub fn transaction(&self, id: i64) -> Result<Option<Transaction>> {
        transactions::get(&self.conn, id)
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        transactions::list_all(&self.conn)
    }

    pub fn transactions_in_month(&self, year_month: &str) -> Result<Vec<Transaction>> {
        transactions::list_by_month(&self.conn, year_month)
    }

    // ─── Balance ───

    pub fn balance(&self) -> Result<Decimal> {
        balance::load(&self.conn)
    }

    /// Direct override. Negative values are floored at zero like every other
    /// balance write.
    pub fn set_balance(&mut self, value: Decimal) -> Result<Decimal> {
        let value = balance::floor(value);
        balance::store(&self.conn, value)?;
        info!(balance = %value, "balance set");
        self.observers.notify(Change::Balance(value));
        Ok(value)
    }

    // ─── Categories ───

    pub fn registry(&self) -> Result<CategoryRegistry> {
        CategoryRegistry::load(&self.conn)
    }

    pub fn save_category(&mut self, entry: &CategoryEntry) -> Result<()> {
        categories::upsert(&self.conn, entry)?;
        info!(key = %entry.key, "category saved");
        self.observers.notify(Change::Categories);
        Ok(())
    }

    pub fn remove_category(&mut self, key: &str) -> Result<bool> {
        let removed = categories::remove(&self.conn, key)?;
        if removed {
            info!(key, "category removed");
            self.observers.notify(Change::Categories);
        }
        Ok(removed)
    }

    // ─── Settings ───

    pub fn settings(&self) -> Result<Settings> {
        settings::load(&self.conn)
    }

    pub fn set_monthly_budget(&mut self, value: Decimal) -> Result<()> {
        settings::set_monthly_budget(&self.conn, value)?;
        self.settings_changed("monthly_budget");
        Ok(())
    }

    pub fn set_currency_symbol(&mut self, symbol: &str) -> Result<()> {
        settings::set_currency_symbol(&self.conn, symbol)?;
        self.settings_changed("currency_symbol");
        Ok(())
    }

    pub fn set_pin(&mut self, pin: &str) -> Result<()> {
        settings::set_pin(&self.conn, pin)?;
        self.settings_changed("pin_code");
        Ok(())
    }

    pub fn verify_pin(&self, entered: &str) -> Result<bool> {
        settings::verify_pin(&self.conn, entered)
    }

    pub fn update_profile(&mut self, profile: &Profile) -> Result<()> {
        settings::set_profile(&self.conn, profile)?;
        self.settings_changed("profile");
        Ok(())
    }

    pub fn set_profile_image(&mut self, reference: &str) -> Result<()> {
        settings::set_profile_image(&self.conn, reference)?;
        self.settings_changed("profile_image");
        Ok(())
    }

    fn settings_changed(&mut self, field: &str) {
        info!(field, "setting updated");
        self.observers.notify(Change::Settings);
    }

    /// Startup hook for recurring entries. Nothing is generated yet; this only
    /// advances the last-processed marker. Returns whether it moved.
    pub fn process_recurring(&mut self, today: NaiveDate) -> Result<bool> {
        let last = settings::load(&self.conn)?.last_recurring_processed;
        if last.is_some_and(|d| d >= today) {
            return Ok(false);
        }
        settings::set_last_recurring_processed(&self.conn, today)?;
        Ok(true)
    }

    pub fn factory_reset(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        backup::erase_all(&tx)?;
        tx.commit()?;
        warn!("factory reset: all transactions, categories and settings erased");
        self.observers.notify(Change::Reset);
        Ok(())
    }

    // ─── Backup ───

    pub fn export(&self) -> Result<BackupDocument> {
        backup::export(&self.conn)
    }

    pub fn export_json(&self) -> Result<String> {
        backup::to_json(&self.export()?)
    }

    pub fn import(&mut self, doc: &BackupDocument) -> Result<RestoreSummary> {
        let summary = backup::restore(&mut self.conn, doc)?;
        info!(
            transactions = summary.transactions,
            categories = summary.categories,
            "backup restored"
        );
        self.observers.notify(Change::Reset);
        Ok(summary)
    }

    pub fn import_json(&mut self, json: &str) -> Result<RestoreSummary> {
        let doc = backup::parse(json).inspect_err(|e| {
            warn!(error = %e, "backup rejected; existing data left untouched");
        })?;
        self.import(&doc)
    }

    // ─── Derived views ───

    pub fn insights(&self, today: NaiveDate) -> Result<Vec<Insight>> {
        let all = self.transactions()?;
        let month = aggregate::month_filter(&all, &aggregate::month_prefix(today));
        let expenses = aggregate::expenses_only(&month);
        let totals = aggregate::category_totals(&expenses);
        let today_key = today.format(DATE_FORMAT).to_string();
        let todays: Vec<Transaction> = all.iter().filter(|t| t.date == today_key).cloned().collect();
        let inputs = InsightInputs {
            month_spent: aggregate::total(&expenses),
            monthly_budget: settings::monthly_budget(&self.conn)?,
            category_totals: &totals,
            today: &todays,
            has_transactions: !all.is_empty(),
        };
        Ok(insights::generate(&inputs, &self.registry()?))
    }

    pub fn lifetime_stats(&self) -> Result<LifetimeStats> {
        Ok(aggregate::lifetime_stats(&self.transactions()?))
    }

    pub fn dashboard(&self, today: NaiveDate) -> Result<Dashboard> {
        let all = self.transactions()?;
        let month_key = aggregate::month_prefix(today);
        let month = aggregate::month_filter(&all, &month_key);
        let summary = aggregate::month_summary(&month);
        let budget = settings::monthly_budget(&self.conn)?;
        let expenses = aggregate::expenses_only(&month);
        let usage = aggregate::budget_usage(summary.expense, budget);
        Ok(Dashboard {
            balance: self.balance()?,
            month: month_key,
            goal_achieved: usage.within_goal() && !month.is_empty(),
            usage,
            summary,
            average_daily: aggregate::average_daily_spend(&month),
            streak_days: aggregate::streak(today, aggregate::daily_target(budget, today), &all),
            days_left: aggregate::days_left_in_month(today),
            category_totals: aggregate::category_totals(&expenses),
            recent: all.into_iter().take(RECENT_COUNT).collect(),
        })
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categories::CategoryRegistry;
use crate::models::Transaction;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    BudgetWarning { percent: u32 },
    BudgetHalfway,
    WithinBudget,
    TopCategory { label: String, icon: String },
    NoSpendToday,
    Welcome,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::BudgetWarning { percent } => {
                write!(f, "⚠️ You've spent {}% of your budget this month!", percent)
            }
            Insight::BudgetHalfway => f.write_str("📊 You've spent half of your budget."),
            Insight::WithinBudget => f.write_str("🌟 Great job! You are well within your budget."),
            Insight::TopCategory { label, icon } => {
                write!(f, "💡 Top spending category: {} ({})", label, icon)
            }
            Insight::NoSpendToday => f.write_str("🎉 No expenses so far today. Keep it up!"),
            Insight::Welcome => f.write_str("Welcome! Start adding expenses to see insights here."),
        }
    }
}

/// Everything the generator looks at.
#[derive(Debug, Clone)]
pub struct InsightInputs<'a> {
    pub month_spent: Decimal,
    pub monthly_budget: Decimal,
    /// Ordered largest first, as produced by `aggregate::category_totals`.
    pub category_totals: &'a [(String, Decimal)],
    pub today: &'a [Transaction],
    pub has_transactions: bool,
}

pub fn generate(inputs: &InsightInputs<'_>, registry: &CategoryRegistry) -> Vec<Insight> {
    let mut out = Vec::new();

    if inputs.monthly_budget > Decimal::ZERO {
        let fraction = inputs.month_spent / inputs.monthly_budget;
        if fraction >= Decimal::new(9, 1) {
            let percent = (fraction * Decimal::ONE_HUNDRED)
                .trunc()
                .to_u32()
                .unwrap_or(u32::MAX);
            out.push(Insight::BudgetWarning { percent });
        } else if fraction >= Decimal::new(5, 1) {
            out.push(Insight::BudgetHalfway);
        } else if inputs.month_spent > Decimal::ZERO {
            out.push(Insight::WithinBudget);
        }
    }

    if let Some((key, value)) = inputs.category_totals.first() {
        if *value > Decimal::ZERO {
            out.push(Insight::TopCategory {
                label: registry.resolve_label(key),
                icon: registry.resolve_icon(key),
            });
        }
    }

    if inputs.has_transactions && inputs.today.is_empty() {
        out.push(Insight::NoSpendToday);
    }

    if out.is_empty() {
        out.push(Insight::Welcome);
    }
    out
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the ledger core.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("Malformed backup document: {0}")]
    Backup(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Corrupt stored value for '{key}': {value}")]
    Corrupt { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, BudgetError>;

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod app;
pub mod backup;
pub mod balance;
pub mod categories;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod insights;
pub mod models;
pub mod observe;
pub mod settings;
pub mod transactions;
pub mod utils;

pub use app::Budget;
pub use error::{BudgetError, Result};

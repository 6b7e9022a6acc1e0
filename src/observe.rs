// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use std::sync::mpsc::{Receiver, Sender, channel};

/// A committed change. Sent only after the write has reached the database.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Transactions,
    Categories,
    Balance(Decimal),
    Settings,
    Reset,
}

#[derive(Debug, Default)]
pub struct Observers {
    senders: Vec<Sender<Change>>,
}

impl Observers {
    pub fn subscribe(&mut self) -> Receiver<Change> {
        let (tx, rx) = channel();
        self.senders.push(tx);
        rx
    }

    /// Delivers `change` to every live subscriber and forgets dropped ones.
    pub fn notify(&mut self, change: Change) {
        self.senders.retain(|tx| tx.send(change.clone()).is_ok());
    }
}

use serde::{Deserialize, Serialize};

use crate::ledger::unix_time;

/// A value transfer between two peers.
///
/// Immutable once created: it sits in the pending pool until a mined block
/// absorbs it, and from then on belongs to that block. The amount is not
/// validated by the core; zero and negative values pass through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    pub amount: f64,
    pub timestamp: f64,
}

impl Transaction {
    /// Build a transaction stamped with the current time.
    pub fn new(sender: String, recipient: String, amount: f64) -> Self {
        Self {
            sender,
            recipient,
            amount,
            timestamp: unix_time(),
        }
    }
}

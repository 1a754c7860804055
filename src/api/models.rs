use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::{Block, DEFAULT_DIFFICULTY, Ledger};
use crate::metrics::{EventLog, Metrics};
use crate::miner::Miner;

/// Shared application state: the ledger behind its mutex, the miner with its
/// sealing lock, and the metrics/event sink. Constructed once at startup and
/// shared by reference across all workers.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub miner: Miner,
    pub metrics: Metrics,
    pub events: EventLog,
}

impl AppState {
    pub fn new(difficulty: u32) -> Self {
        let state = Self {
            ledger: Mutex::new(Ledger::new(difficulty)),
            miner: Miner::new(),
            metrics: Metrics::default(),
            events: EventLog::default(),
        };
        state.events.record("Genesis block created.");
        state
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

/* ---------- Transaction API models ---------- */

/// Incoming transaction submission. All three fields are required; they are
/// optional here so a missing one can be rejected with a message instead of
/// a bare deserialization error.
#[derive(Deserialize)]
pub struct NewTransactionRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<f64>,
}

impl NewTransactionRequest {
    pub fn into_fields(self) -> Result<(String, String, f64), LedgerError> {
        let sender = self.sender.ok_or(LedgerError::MissingField("sender"))?;
        let recipient = self.recipient.ok_or(LedgerError::MissingField("recipient"))?;
        let amount = self.amount.ok_or(LedgerError::MissingField("amount"))?;
        Ok((sender, recipient, amount))
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Mine API models ---------- */

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub block: Block,
}

/* ---------- Chain API models ---------- */

#[derive(Serialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub length: usize,
    pub difficulty: u32,
}

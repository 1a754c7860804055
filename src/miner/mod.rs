use std::sync::Mutex;

use log::{debug, info};

use crate::error::LedgerError;
use crate::ledger::{Block, Ledger};

/// Proof-of-Work search over a candidate block.
///
/// The default search is an unbounded brute force; the trait exists so a
/// bounded or cancellable variant can be swapped in without touching the
/// ledger.
pub trait ProofSearch: Send + Sync {
    /// Find a proof for `block` whose hash meets `difficulty` and leave the
    /// winning proof and hash set on the block.
    fn search(&self, block: &mut Block, difficulty: u32);
}

/// Exhaustive search over proof values 0, 1, 2, ...
pub struct BruteForce;

impl ProofSearch for BruteForce {
    fn search(&self, block: &mut Block, difficulty: u32) {
        block.proof = 0;
        loop {
            block.hash = block.compute_hash();
            if block.meets_difficulty(difficulty) {
                break;
            }
            block.proof = block.proof.wrapping_add(1);
        }
    }
}

/// Builds candidate blocks from the pending pool and appends them once the
/// proof search succeeds.
pub struct Miner {
    strategy: Box<dyn ProofSearch>,
    // Serializes concurrent mine calls; two miners racing on the same tip
    // must not both append.
    sealing: Mutex<()>,
}

impl Miner {
    pub fn new() -> Self {
        Self::with_strategy(Box::new(BruteForce))
    }

    pub fn with_strategy(strategy: Box<dyn ProofSearch>) -> Self {
        Self {
            strategy,
            sealing: Mutex::new(()),
        }
    }

    /// Mine the pending pool into a new block.
    ///
    /// The pool capture and the tip read happen under a single ledger lock,
    /// and the pool swap is what clears it; submissions arriving while the
    /// proof search runs land in the fresh pool and stay pending. The search
    /// itself runs with no locks held, so submitters are never blocked on it.
    pub fn mine(&self, ledger: &Mutex<Ledger>) -> Result<Block, LedgerError> {
        let _sealing = self.sealing.lock().expect("mutex poisoned");

        let (mut block, difficulty) = {
            let mut ledger = ledger.lock().expect("mutex poisoned");
            if ledger.pending().is_empty() {
                return Err(LedgerError::EmptyPool);
            }
            let (index, previous_hash) = {
                let tip = ledger.last_block()?;
                (tip.index + 1, tip.hash.clone())
            };
            let difficulty = ledger.difficulty();
            let transactions = ledger.take_pool();
            (Block::new(index, previous_hash, transactions), difficulty)
        };

        debug!(
            "mining block {} with {} transactions (difficulty {})",
            block.index,
            block.transactions.len(),
            difficulty
        );
        self.strategy.search(&mut block, difficulty);

        {
            let mut ledger = ledger.lock().expect("mutex poisoned");
            ledger.append(block.clone());
        }
        info!(
            "sealed block {} (proof={}, hash={})",
            block.index, block.proof, block.hash
        );
        Ok(block)
    }
}

impl Default for Miner {
    fn default() -> Self {
        Self::new()
    }
}

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::unix_time;
use crate::transaction::Transaction;

/// A single block in the chain holding the transactions absorbed from the
/// pending pool. Blocks are immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64, // Unix float seconds
    pub transactions: Vec<Transaction>,
    pub proof: u64, // Proof-of-Work counter
    pub previous_hash: String,
    pub hash: String, // Cached content hash
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        let mut block = Self {
            index: 1,
            timestamp: unix_time(),
            transactions: Vec::new(),
            proof: 1,
            previous_hash: String::from("0"),
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Create a candidate block (not mined yet). The miner drives the proof
    /// search and sets the winning hash.
    pub fn new(index: u64, previous_hash: String, transactions: Vec<Transaction>) -> Self {
        let mut block = Self {
            index,
            timestamp: unix_time(),
            transactions,
            proof: 0,
            previous_hash,
            hash: String::new(),
        };
        block.hash = block.compute_hash();
        block
    }

    /// Compute the SHA-256 hash of this block's content, excluding the
    /// `hash` field itself. The preimage is the block rendered as JSON with
    /// lexicographically ordered keys, so identical field values always
    /// produce identical bytes.
    pub fn compute_hash(&self) -> String {
        let mut fields = serde_json::to_value(self).expect("serialize block");
        fields
            .as_object_mut()
            .expect("block serializes to an object")
            .remove("hash");
        let mut hasher = Sha256::new();
        hasher.update(fields.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Whether the cached hash has `difficulty` leading zero characters.
    pub fn meets_difficulty(&self, difficulty: u32) -> bool {
        !self.hash.is_empty()
            && self
                .hash
                .chars()
                .take(difficulty as usize)
                .all(|c| c == '0')
    }

    /// Validate that the cached `hash` matches the block's content and
    /// satisfies the PoW difficulty. (Does NOT validate chain linkage.)
    pub fn is_valid(&self, difficulty: u32) -> bool {
        self.hash == self.compute_hash() && self.meets_difficulty(difficulty)
    }
}

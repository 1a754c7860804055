use super::Block;
use crate::error::LedgerError;
use crate::transaction::Transaction;

/// In-memory chain plus the pool of transactions awaiting inclusion.
///
/// The chain starts at genesis and only ever grows by appending; the pool is
/// appended to on submission and swapped out wholesale when a block is mined.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pool: Vec<Transaction>,
    difficulty: u32,
}

impl Ledger {
    /// Initialize a ledger with a genesis block. The difficulty is fixed for
    /// the lifetime of the ledger.
    pub fn new(difficulty: u32) -> Self {
        Self {
            chain: vec![Block::genesis()],
            pool: Vec::new(),
            difficulty,
        }
    }

    /// Queue a transaction and return the index of the block it is expected
    /// to land in on the next successful mine.
    ///
    /// The returned index is advisory only: submissions arriving before the
    /// next mine share the same expected index, and nothing guarantees the
    /// transaction lands exactly there.
    pub fn add_transaction(&mut self, sender: String, recipient: String, amount: f64) -> u64 {
        self.pool.push(Transaction::new(sender, recipient, amount));
        self.chain.len() as u64 + 1
    }

    /// The chain's final block.
    pub fn last_block(&self) -> Result<&Block, LedgerError> {
        self.chain.last().ok_or(LedgerError::EmptyChain)
    }

    /// Clone of the full chain for external readers.
    pub fn snapshot(&self) -> Vec<Block> {
        self.chain.clone()
    }

    /// Transactions still awaiting inclusion, in submission order.
    pub fn pending(&self) -> &[Transaction] {
        &self.pool
    }

    /// Swap the pool for an empty one and return the captured transactions.
    /// Submissions after this call accumulate in the fresh pool.
    pub fn take_pool(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pool)
    }

    /// Append a mined block to the chain.
    pub fn append(&mut self, block: Block) {
        self.chain.push(block);
    }

    /// Validate the entire chain: genesis shape, hash integrity, linkage
    /// and PoW difficulty.
    pub fn is_valid_chain(&self) -> bool {
        let Some(genesis) = self.chain.first() else {
            return false;
        };
        if genesis.index != 1
            || genesis.previous_hash != "0"
            || genesis.hash != genesis.compute_hash()
        {
            return false;
        }

        for i in 1..self.chain.len() {
            let current = &self.chain[i];
            let prev = &self.chain[i - 1];

            if current.previous_hash != prev.hash {
                return false;
            }
            if current.index != prev.index + 1 {
                return false;
            }
            if !current.is_valid(self.difficulty) {
                return false;
            }
        }

        true
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }
}

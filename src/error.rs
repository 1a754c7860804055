use thiserror::Error;

/// Errors surfaced by the ledger core.
///
/// `MissingField` and `EmptyPool` map to 4xx responses at the HTTP boundary
/// and never mutate state. `EmptyChain` is unreachable once the genesis block
/// exists; seeing it indicates a construction bug.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("missing transaction field: {0}")]
    MissingField(&'static str),

    #[error("no pending transactions to mine")]
    EmptyPool,

    #[error("chain has no blocks; genesis is missing")]
    EmptyChain,
}

use thiserror::Error;

/// First violation found while walking a chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("block {index}: stored hash does not match its contents")]
    HashMismatch { index: u64 },

    #[error("block {index}: previous hash does not match the preceding block")]
    BrokenLink { index: u64 },

    #[error("block {index}: hash lacks {difficulty} leading zero digits")]
    InsufficientWork { index: u64, difficulty: usize },

    #[error("position {position}: expected index {expected}, found {found}")]
    IndexGap {
        position: usize,
        expected: u64,
        found: u64,
    },
}

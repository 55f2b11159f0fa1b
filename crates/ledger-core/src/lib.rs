use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::info;

pub mod chain;
pub mod constants;
mod error;
pub mod pow;

pub use chain::Chain;
pub use error::ValidationError;

/// Wall-clock seconds since the Unix epoch, with sub-second precision.
pub fn now_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

/// A single ledger entry.
///
/// Fields are only readable from outside the crate; the stored `hash` is
/// recomputed by every path that changes a hashed field.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Block {
    index: u64,
    previous_hash: String,
    payload: String,
    timestamp: f64,
    nonce: u64,
    hash: String,
}

impl Block {
    /// Build a block and hash it. `timestamp` defaults to now.
    pub fn new(
        index: u64,
        previous_hash: impl Into<String>,
        payload: impl Into<String>,
        timestamp: Option<f64>,
        nonce: u64,
    ) -> Self {
        let mut block = Self {
            index,
            previous_hash: previous_hash.into(),
            payload: payload.into(),
            timestamp: timestamp.unwrap_or_else(now_timestamp),
            nonce,
            hash: String::new(),
        };
        block.hash = block.compute_digest();
        block
    }

    /// Candidate block stamped with the current time and a zero nonce.
    pub fn candidate(
        index: u64,
        previous_hash: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self::new(index, previous_hash, payload, None, 0)
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Hex SHA-256 over `index ‖ previous_hash ‖ payload ‖ timestamp ‖ nonce`,
    /// with no separators. Does not touch the stored hash.
    pub fn compute_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.index.to_string());
        hasher.update(&self.previous_hash);
        hasher.update(&self.payload);
        // Debug keeps a trailing ".0" on integral values.
        hasher.update(format!("{:?}", self.timestamp));
        hasher.update(self.nonce.to_string());
        hex::encode(hasher.finalize())
    }

    pub fn is_hash_consistent(&self) -> bool {
        self.hash == self.compute_digest()
    }

    /// Search nonces from the current one until the hash has at least
    /// `difficulty` leading zero digits.
    ///
    /// The digest is refreshed before the first comparison, so a block whose
    /// fields changed since it was last hashed is never accepted on a stale hash.
    pub fn mine(&mut self, difficulty: usize) {
        let started = Instant::now();
        let mut attempts: u64 = 1;
        self.hash = self.compute_digest();
        while !pow::meets_difficulty(&self.hash, difficulty) {
            self.nonce = self.nonce.wrapping_add(1);
            self.hash = self.compute_digest();
            attempts += 1;
        }
        info!(
            index = self.index,
            nonce = self.nonce,
            attempts,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Mined block {} with hash {}",
            self.index,
            self.hash
        );
    }

    /// Point the block at a new predecessor. The hash is left for the caller
    /// to refresh, which `mine` does on entry.
    pub(crate) fn link_to(&mut self, previous_hash: String) {
        self.previous_hash = previous_hash;
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block(Index: {}, Previous Hash: {}, Payload: {}, Timestamp: {:?}, Nonce: {}, Hash: {})",
            self.index, self.previous_hash, self.payload, self.timestamp, self.nonce, self.hash
        )
    }
}

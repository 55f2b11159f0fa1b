use crate::constants::{DEFAULT_DIFFICULTY, GENESIS_PAYLOAD, GENESIS_PREVIOUS_HASH};
use crate::{pow, Block, ValidationError};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// In-memory, append-only sequence of blocks gated by proof of work.
#[derive(Clone, Debug, Serialize)]
pub struct Chain {
    blocks: Vec<Block>,
    difficulty: usize,
}

impl Chain {
    /// A chain holding only the genesis block.
    pub fn new(difficulty: usize) -> Self {
        Self {
            blocks: vec![genesis_block()],
            difficulty,
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: genesis is present from construction.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn latest_block(&self) -> &Block {
        // Never empty, see `new`.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Index a caller should give the next candidate.
    pub fn next_index(&self) -> u64 {
        self.latest_block().index() + 1
    }

    /// Relink `candidate` to the current tip, mine it, and admit it.
    ///
    /// Whatever previous hash the candidate carried is replaced. The index is
    /// kept as given; use [`Chain::next_index`] to build a consistent one.
    pub fn append(&mut self, mut candidate: Block) -> &Block {
        let tip = self.latest_block().hash().to_string();
        if candidate.previous_hash() != tip {
            debug!(
                index = candidate.index(),
                "relinking candidate from {} to {}",
                candidate.previous_hash(),
                tip
            );
        }
        candidate.link_to(tip);
        candidate.mine(self.difficulty);
        debug!(
            index = candidate.index(),
            height = self.blocks.len(),
            "block admitted"
        );
        self.blocks.push(candidate);
        self.latest_block()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Walk the chain and report the first violation.
    ///
    /// Genesis is only checked for hash consistency: it has no predecessor to
    /// link to and is never mined. Every later block must hash to its stored
    /// hash, point at its predecessor, and meet the chain difficulty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let result = self.check_blocks();
        if let Err(err) = &result {
            warn!(%err, "chain failed validation");
        }
        result
    }

    fn check_blocks(&self) -> Result<(), ValidationError> {
        for (position, block) in self.blocks.iter().enumerate() {
            if !block.is_hash_consistent() {
                return Err(ValidationError::HashMismatch {
                    index: block.index(),
                });
            }

            if position == 0 {
                // Genesis: exempt from linkage and proof of work.
                continue;
            }

            let previous = &self.blocks[position - 1];
            if block.previous_hash() != previous.hash() {
                return Err(ValidationError::BrokenLink {
                    index: block.index(),
                });
            }

            if !pow::meets_difficulty(block.hash(), self.difficulty) {
                return Err(ValidationError::InsufficientWork {
                    index: block.index(),
                    difficulty: self.difficulty,
                });
            }
        }
        Ok(())
    }

    /// Check that every block's index equals its position. Kept apart from
    /// [`Chain::validate`] since `append` trusts caller-supplied indices.
    pub fn validate_indices(&self) -> Result<(), ValidationError> {
        for (position, block) in self.blocks.iter().enumerate() {
            let expected = position as u64;
            if block.index() != expected {
                return Err(ValidationError::IndexGap {
                    position,
                    expected,
                    found: block.index(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Fixed first block: index 0, previous hash `"0"`, not mined.
pub fn genesis_block() -> Block {
    Block::new(0, GENESIS_PREVIOUS_HASH, GENESIS_PAYLOAD, None, 0)
}

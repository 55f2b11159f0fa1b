pub(crate) const DEMO_DIFFICULTY: u64 = 4;
pub(crate) const MAX_DIFFICULTY: u64 = ledger_core::constants::HASH_HEX_SIZE as u64;

pub mod poem_ledger;
pub mod verse_ledger;

pub use poem_ledger::*;
pub use verse_ledger::*;

// PDA seeds
pub const VERSE_LEDGER_SEED: &[u8] = b"verse_ledger";
pub const POEM_LEDGER_SEED: &[u8] = b"poem_ledger";

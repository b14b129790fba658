//! Capability seams towards external collaborators.
//!
//! The engine stays agnostic of how value custody, token issuance, and
//! verified randomness are actually implemented: it depends only on the
//! three traits here. Each trait ships with an in-memory reference
//! implementation used by the test suites and available for simulation.

mod randomness;
mod token_ledger;
mod treasury;

pub use randomness::{RandomnessOracle, RequestId, SeededOracle};
pub use token_ledger::{InMemoryLedger, TokenLedger};
pub use treasury::{InMemoryTreasury, Treasury};

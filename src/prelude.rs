//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use curvebound::prelude::*;
//! ```

pub use crate::config::{CurveParams, HeightRule};
pub use crate::domain::{
    Address, BasisPoints, FixedPoint, Rounding, Side, TickerInterval, Timestamp, TradeReceipt,
    TraderScore,
};
pub use crate::error::{ErrorKind, PoolError, Result};
pub use crate::math::{amm_output, curve_value, deviation_bps, isqrt, sqrt_scaled};
pub use crate::pool::{Pool, PoolOutcome, PoolStatus, MAX_START_DELAY, ROUND_DURATION};
pub use crate::registry::{LauncherPhase, PendingRandomness, PoolRegistry, RegistryConfig};
pub use crate::traits::{
    InMemoryLedger, InMemoryTreasury, RandomnessOracle, RequestId, SeededOracle, TokenLedger,
    Treasury,
};

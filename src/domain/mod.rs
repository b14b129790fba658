//! Fundamental domain value types used throughout the engine.
//!
//! This module contains the core value types that model the protocol
//! domain: addresses, scaled quantities, basis points, timestamps, candle
//! intervals, and per-trader scores. All types use newtypes with validated
//! constructors to enforce invariants.

mod address;
mod basis_points;
mod fixed_point;
mod rounding;
mod score;
mod side;
mod ticker;
mod timestamp;
mod trade_receipt;

pub use address::Address;
pub use basis_points::BasisPoints;
pub use fixed_point::{FixedPoint, PRECISION};
pub use rounding::Rounding;
pub use score::TraderScore;
pub use side::Side;
pub use ticker::TickerInterval;
pub use timestamp::Timestamp;
pub use trade_receipt::TradeReceipt;

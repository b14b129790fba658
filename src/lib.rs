//! # Curvebound
//!
//! Game-theoretic trading engine: per-round AMM pools whose price path is
//! measured against a deterministic bonded curve, with the most accurate
//! trader parameterizing the next round.
//!
//! Each round is a [`Pool`](pool::Pool): a 24-hour constant-product market
//! seeded by the treasury. Trades move the reserves continuously; on a
//! discrete candle grid the realized output is compared to the bonded
//! curve `y = 4H/L · x(1 − x/L)`. Traders accumulate a mean deviation
//! score, the lowest mean wins the round, and the winner's proposed delay
//! and candle size configure the next pool. If collective trading strays
//! past the deviation threshold the pool is locked — reserves burned or
//! swept — and the next round's parameters come from verified randomness
//! instead.
//!
//! # Quick Start
//!
//! ```rust
//! use core::time::Duration;
//! use curvebound::config::HeightRule;
//! use curvebound::domain::{Address, BasisPoints, FixedPoint, Side, Timestamp};
//! use curvebound::registry::{PoolRegistry, RegistryConfig};
//! use curvebound::traits::{InMemoryLedger, InMemoryTreasury, SeededOracle};
//!
//! // 1. Configure the chain
//! let config = RegistryConfig::new(
//!     FixedPoint::from_regular(1),          // genesis curve height
//!     HeightRule::SqrtProduct,              // H' = √H × √L
//!     FixedPoint::from_regular(1),          // seed per round
//!     FixedPoint::from_regular(1_000_000),  // pool-token supply per round
//!     BasisPoints::new(30),                 // 0.30% trade fee
//! )
//! .expect("valid config");
//!
//! let treasury = InMemoryTreasury::new(FixedPoint::from_regular(100));
//! let mut registry =
//!     PoolRegistry::new(config, treasury, SeededOracle::new(), InMemoryLedger::new())
//!         .expect("valid registry");
//!
//! // 2. Launch the first round (5-minute candles, 6.9% threshold)
//! let now = Timestamp::from_secs(1_000);
//! let id = registry
//!     .create_new_pool(5, 690, Duration::ZERO, now)
//!     .expect("pool launched");
//!
//! // 3. Trade against it
//! let trader = Address::from_bytes([7u8; 32]);
//! let receipt = registry
//!     .trade(id, trader, 1_000, Side::Buy, Duration::ZERO, 5, now)
//!     .expect("trade executed");
//! assert!(receipt.amount_out().get() > 0);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Automation   │  external scheduler: complete_pool, lock, deliveries
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐      Treasury / RandomnessOracle / TokenLedger
//! │   Registry    │◀──▶  capability traits (crate::traits)
//! └──────┬───────┘
//!        │ create / trade / finalize
//!        ▼
//! ┌──────────────┐
//! │    Pool       │  reserves, deviation ledger, lifecycle flags
//! └──────┬───────┘
//!        │ curve_value / amm_output / deviation_bps
//!        ▼
//! ┌──────────────┐
//! │  Math+Domain  │  FixedPoint, BasisPoints, isqrt, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`FixedPoint`](domain::FixedPoint), [`BasisPoints`](domain::BasisPoints), [`Address`](domain::Address), … |
//! | [`math`] | Deterministic arithmetic: [`isqrt`](math::isqrt), [`curve_value`](math::curve_value), [`amm_output`](math::amm_output) |
//! | [`config`] | Immutable blueprints: [`CurveParams`](config::CurveParams), [`HeightRule`](config::HeightRule) |
//! | [`pool`] | The round state machine: [`Pool`](pool::Pool) |
//! | [`registry`] | Round orchestration: [`PoolRegistry`](registry::PoolRegistry) |
//! | [`traits`] | Collaborator capabilities + in-memory references |
//! | [`error`] | [`PoolError`](error::PoolError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod registry;
pub mod traits;

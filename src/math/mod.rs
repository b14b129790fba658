//! Arithmetic engine for the protocol's financial computations.
//!
//! Everything here is a pure function over domain types: the integer
//! square root, the bonded-curve evaluation, the constant-product output,
//! and the basis-point deviation measure. Determinism is the contract —
//! two independent runs over the same inputs must agree bit-for-bit, so
//! there is no floating point and no platform-dependent behaviour.

mod curve;
mod sqrt;

pub use curve::{amm_output, curve_value, deviation_bps};
pub use sqrt::{isqrt, sqrt_scaled};

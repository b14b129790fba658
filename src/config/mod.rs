//! Immutable configuration blueprints.
//!
//! [`CurveParams`] fixes one round's reference curve; [`HeightRule`] is
//! the explicit choice of cross-round amplitude recurrence. Registry-wide
//! settings live in [`RegistryConfig`](crate::registry::RegistryConfig).

mod curve_params;

pub use curve_params::{CurveParams, HeightRule};

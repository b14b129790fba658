//! Basis-point representation for deviations, thresholds, and fees.

use core::fmt;

use super::{FixedPoint, Rounding};

/// Denominator that represents 100%.
const MAX_BPS: u128 = 10_000;

/// A quantity expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Thresholds and fees live in the percentage range `0..=10_000`; measured
/// curve deviations are unbounded (an AMM fill can land arbitrarily far
/// from the curve), so the backing type is `u128` and
/// [`is_valid_percent`](Self::is_valid_percent) distinguishes the two uses.
///
/// # Examples
///
/// ```
/// use curvebound::domain::BasisPoints;
///
/// let bp = BasisPoints::new(690);
/// assert_eq!(bp.get(), 690);
/// assert!(bp.is_valid_percent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u128);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(MAX_BPS);

    /// Protocol-default deviation threshold (6.9%).
    pub const DEFAULT_THRESHOLD: Self = Self(690);

    /// Creates a new `BasisPoints` from a raw value.
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the value is in the valid percentage range
    /// (`0..=10_000`).
    #[must_use]
    pub const fn is_valid_percent(&self) -> bool {
        self.0 <= MAX_BPS
    }

    /// Saturating accumulation of another sample.
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Computes `amount × (self / 10_000)` with explicit rounding.
    ///
    /// Saturates instead of failing when the intermediate product would
    /// overflow (divide-before-multiply fallback).
    #[must_use]
    pub const fn apply(&self, amount: FixedPoint, rounding: Rounding) -> FixedPoint {
        let raw = amount.get();
        match raw.checked_mul(self.0) {
            Some(product) => {
                let quotient = product / MAX_BPS;
                let remainder = product % MAX_BPS;
                if rounding.is_up() && remainder != 0 {
                    FixedPoint::new(quotient + 1)
                } else {
                    FixedPoint::new(quotient)
                }
            }
            None => FixedPoint::new((raw / MAX_BPS).saturating_mul(self.0)),
        }
    }

    /// Expresses `numerator / denominator` in basis points, rounding down.
    ///
    /// Returns [`ZERO`](Self::ZERO) when the denominator is zero — the
    /// degenerate case is a defined result, matching the deviation rule
    /// for a zero curve expectation.
    #[must_use]
    pub const fn from_ratio(numerator: FixedPoint, denominator: FixedPoint) -> Self {
        if denominator.is_zero() {
            return Self::ZERO;
        }
        let n = numerator.get();
        let d = denominator.get();
        match n.checked_mul(MAX_BPS) {
            Some(scaled) => Self(scaled / d),
            None => Self((n / d).saturating_mul(MAX_BPS)),
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

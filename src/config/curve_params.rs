//! Immutable per-pool curve configuration.

use core::time::Duration;

use crate::domain::{BasisPoints, FixedPoint, TickerInterval};
use crate::error::{PoolError, Result};
use crate::math::sqrt_scaled;

/// Upper bound on the deviation threshold (50%).
const MAX_THRESHOLD: BasisPoints = BasisPoints::new(5_000);

/// Configuration for one trading round's reference curve.
///
/// Fixed at pool creation and never mutated. Defines the bonded curve the
/// round is measured against (amplitude + candle grid) and the two
/// protocol percentages (deviation threshold, trade fee).
///
/// # Validation
///
/// - `height` must be non-zero (a flat curve makes every fill a 100%
///   deviation).
/// - `threshold` must lie in `(0, 5_000]` basis points.
/// - `fee` must be a valid percentage strictly below 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveParams {
    height: FixedPoint,
    ticker: TickerInterval,
    threshold: BasisPoints,
    fee: BasisPoints,
}

impl CurveParams {
    /// Creates a new `CurveParams`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidParameter`] if any invariant fails.
    pub const fn new(
        height: FixedPoint,
        ticker: TickerInterval,
        threshold: BasisPoints,
        fee: BasisPoints,
    ) -> Result<Self> {
        let params = Self {
            height,
            ticker,
            threshold,
            fee,
        };
        match params.validate() {
            Ok(()) => Ok(params),
            Err(e) => Err(e),
        }
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidParameter`] if any invariant fails.
    pub const fn validate(&self) -> Result<()> {
        if self.height.is_zero() {
            return Err(PoolError::InvalidParameter("curve height must be non-zero"));
        }
        if self.threshold.is_zero() {
            return Err(PoolError::InvalidParameter(
                "deviation threshold must be positive",
            ));
        }
        if self.threshold.get() > MAX_THRESHOLD.get() {
            return Err(PoolError::InvalidParameter(
                "deviation threshold must not exceed 5000bp",
            ));
        }
        if self.fee.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(PoolError::InvalidParameter(
                "trade fee must be below 100%",
            ));
        }
        Ok(())
    }

    /// Returns the curve amplitude, in scaled form.
    #[must_use]
    pub const fn height(&self) -> FixedPoint {
        self.height
    }

    /// Returns the candle interval.
    #[must_use]
    pub const fn ticker(&self) -> TickerInterval {
        self.ticker
    }

    /// Returns the number of candles in the round.
    #[must_use]
    pub const fn candle_count(&self) -> u64 {
        self.ticker.candle_count()
    }

    /// Returns the wall-time length of one candle.
    #[must_use]
    pub const fn candle_duration(&self) -> Duration {
        self.ticker.candle_duration()
    }

    /// Returns the deviation threshold.
    #[must_use]
    pub const fn threshold(&self) -> BasisPoints {
        self.threshold
    }

    /// Returns the per-trade fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }
}

/// The cross-round height recurrence.
///
/// Decides how the next round's curve amplitude is derived from the
/// current running height and the next round's candle count `L`. The
/// variants diverge quickly over many rounds, so the rule is an explicit
/// registry configuration rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeightRule {
    /// `H' = √H × √L` — the protocol default.
    #[default]
    SqrtProduct,
    /// `H' = H + √L`.
    Additive,
    /// `H' = H × √L`.
    Multiplicative,
}

impl HeightRule {
    /// Derives the next round's height, in scaled form.
    ///
    /// All square roots are fixed-point-correct (`sqrt_scaled`), so the
    /// result stays on the 10^8 scale regardless of variant.
    #[must_use]
    pub fn next_height(&self, height: FixedPoint, candle_count: u64) -> FixedPoint {
        let sqrt_l = sqrt_scaled(FixedPoint::from_regular(u128::from(candle_count)));
        match self {
            Self::SqrtProduct => sqrt_scaled(height).mul_scaled(sqrt_l),
            Self::Additive => height.saturating_add(sqrt_l),
            Self::Multiplicative => height.mul_scaled(sqrt_l),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn valid_params() -> CurveParams {
        let Ok(p) = CurveParams::new(
            FixedPoint::from_regular(1),
            TickerInterval::M5,
            BasisPoints::DEFAULT_THRESHOLD,
            BasisPoints::new(30),
        ) else {
            panic!("expected valid params");
        };
        p
    }

    // -- Validation -----------------------------------------------------------

    #[test]
    fn valid_config() {
        let p = valid_params();
        assert_eq!(p.height(), FixedPoint::from_regular(1));
        assert_eq!(p.ticker(), TickerInterval::M5);
        assert_eq!(p.candle_count(), 288);
        assert_eq!(p.threshold(), BasisPoints::new(690));
        assert_eq!(p.fee(), BasisPoints::new(30));
    }

    #[test]
    fn zero_height_rejected() {
        let result = CurveParams::new(
            FixedPoint::ZERO,
            TickerInterval::M5,
            BasisPoints::DEFAULT_THRESHOLD,
            BasisPoints::ZERO,
        );
        assert!(matches!(result, Err(PoolError::InvalidParameter(_))));
    }

    #[test]
    fn zero_threshold_rejected() {
        let result = CurveParams::new(
            FixedPoint::ONE,
            TickerInterval::M5,
            BasisPoints::ZERO,
            BasisPoints::ZERO,
        );
        assert!(result.is_err());
    }

    #[test]
    fn threshold_above_half_rejected() {
        let result = CurveParams::new(
            FixedPoint::ONE,
            TickerInterval::M5,
            BasisPoints::new(5_001),
            BasisPoints::ZERO,
        );
        assert!(result.is_err());
    }

    #[test]
    fn threshold_at_bound_accepted() {
        let result = CurveParams::new(
            FixedPoint::ONE,
            TickerInterval::M5,
            BasisPoints::new(5_000),
            BasisPoints::ZERO,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn full_fee_rejected() {
        let result = CurveParams::new(
            FixedPoint::ONE,
            TickerInterval::M5,
            BasisPoints::DEFAULT_THRESHOLD,
            BasisPoints::MAX_PERCENT,
        );
        assert!(result.is_err());
    }

    #[test]
    fn candle_duration_follows_ticker() {
        let p = valid_params();
        assert_eq!(p.candle_duration(), Duration::from_secs(300));
    }

    // -- HeightRule -----------------------------------------------------------

    #[test]
    fn default_rule_is_sqrt_product() {
        assert_eq!(HeightRule::default(), HeightRule::SqrtProduct);
    }

    #[test]
    fn sqrt_product_from_unit_height() {
        // H = 1, L = 288: H' = √1 × √288 = 16.97056274
        let next = HeightRule::SqrtProduct.next_height(FixedPoint::ONE, 288);
        assert_eq!(next.get(), 1_697_056_274);
    }

    #[test]
    fn sqrt_product_perfect_squares() {
        // H = 4, L = 144: H' = 2 × 12 = 24
        let next = HeightRule::SqrtProduct.next_height(FixedPoint::from_regular(4), 144);
        assert_eq!(next, FixedPoint::from_regular(24));
    }

    #[test]
    fn additive_rule() {
        // H = 10, L = 144: H' = 10 + 12 = 22
        let next = HeightRule::Additive.next_height(FixedPoint::from_regular(10), 144);
        assert_eq!(next, FixedPoint::from_regular(22));
    }

    #[test]
    fn multiplicative_rule() {
        // H = 10, L = 144: H' = 10 × 12 = 120
        let next = HeightRule::Multiplicative.next_height(FixedPoint::from_regular(10), 144);
        assert_eq!(next, FixedPoint::from_regular(120));
    }

    #[test]
    fn rules_diverge_over_rounds() {
        let mut sqrt_h = FixedPoint::from_regular(100);
        let mut mul_h = FixedPoint::from_regular(100);
        for _ in 0..5 {
            sqrt_h = HeightRule::SqrtProduct.next_height(sqrt_h, 96);
            mul_h = HeightRule::Multiplicative.next_height(mul_h, 96);
        }
        assert!(mul_h > sqrt_h);
    }
}

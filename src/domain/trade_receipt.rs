//! Outcome of a single trade.

use core::fmt;

use super::{BasisPoints, FixedPoint};
use crate::error::{PoolError, Result};

/// The outcome of a trade: what was filled, what it cost, and how the
/// deviation evaluation went.
///
/// # Invariants
///
/// - `amount_out > 0` — a trade that produces no output is rejected
///   upstream, never receipted.
/// - `fee < amount_in` is enforced where the fee is computed; the receipt
///   carries the fee for auditability only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeReceipt {
    amount_out: FixedPoint,
    fee: FixedPoint,
    deviation: BasisPoints,
    candle: u64,
    new_candle: bool,
    new_winner: bool,
    locked: bool,
}

impl TradeReceipt {
    /// Creates a new `TradeReceipt` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidParameter`] if `amount_out` is zero.
    pub const fn new(
        amount_out: FixedPoint,
        fee: FixedPoint,
        deviation: BasisPoints,
        candle: u64,
        new_candle: bool,
        new_winner: bool,
        locked: bool,
    ) -> Result<Self> {
        if amount_out.is_zero() {
            return Err(PoolError::InvalidParameter("amount_out must be positive"));
        }
        Ok(Self {
            amount_out,
            fee,
            deviation,
            candle,
            new_candle,
            new_winner,
            locked,
        })
    }

    /// Returns the amount the trader received, in scaled form.
    #[must_use]
    pub const fn amount_out(&self) -> FixedPoint {
        self.amount_out
    }

    /// Returns the fee forwarded to the treasury, in scaled form.
    #[must_use]
    pub const fn fee(&self) -> FixedPoint {
        self.fee
    }

    /// Returns the measured curve deviation of this fill.
    #[must_use]
    pub const fn deviation(&self) -> BasisPoints {
        self.deviation
    }

    /// Returns the candle index the trade landed in.
    #[must_use]
    pub const fn candle(&self) -> u64 {
        self.candle
    }

    /// Returns `true` if this was the first deviation evaluation of its
    /// candle.
    #[must_use]
    pub const fn is_new_candle(&self) -> bool {
        self.new_candle
    }

    /// Returns `true` if this trade changed the pool's provisional winner.
    #[must_use]
    pub const fn is_new_winner(&self) -> bool {
        self.new_winner
    }

    /// Returns `true` if this trade tripped the deviation threshold and
    /// locked the pool.
    #[must_use]
    pub const fn locked_pool(&self) -> bool {
        self.locked
    }
}

impl fmt::Display for TradeReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "out={} fee={} deviation={} candle={}",
            self.amount_out, self.fee, self.deviation, self.candle
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_receipt() {
        let Ok(r) = TradeReceipt::new(
            FixedPoint::new(990),
            FixedPoint::new(3),
            BasisPoints::new(120),
            4,
            true,
            false,
            false,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(r.amount_out(), FixedPoint::new(990));
        assert_eq!(r.fee(), FixedPoint::new(3));
        assert_eq!(r.deviation(), BasisPoints::new(120));
        assert_eq!(r.candle(), 4);
        assert!(r.is_new_candle());
        assert!(!r.is_new_winner());
        assert!(!r.locked_pool());
    }

    #[test]
    fn zero_output_rejected() {
        let result = TradeReceipt::new(
            FixedPoint::ZERO,
            FixedPoint::ZERO,
            BasisPoints::ZERO,
            0,
            false,
            false,
            false,
        );
        assert!(matches!(result, Err(PoolError::InvalidParameter(_))));
    }

    #[test]
    fn display_mentions_candle() {
        let Ok(r) = TradeReceipt::new(
            FixedPoint::new(990),
            FixedPoint::ZERO,
            BasisPoints::ZERO,
            7,
            false,
            false,
            false,
        ) else {
            panic!("expected Ok");
        };
        assert!(format!("{r}").contains("candle=7"));
    }
}

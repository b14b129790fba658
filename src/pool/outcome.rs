//! Result of finalizing a pool.

use crate::config::CurveParams;
use crate::domain::Address;

/// What a finished round reports back to the launcher.
///
/// `was_locked` (or an absent winner) routes the launcher onto the
/// randomized-parameter path for the next round; otherwise the winner's
/// recorded choices drive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOutcome {
    winner: Option<Address>,
    was_locked: bool,
    total_volume: u64,
    params: CurveParams,
}

impl PoolOutcome {
    pub(crate) const fn new(
        winner: Option<Address>,
        was_locked: bool,
        total_volume: u64,
        params: CurveParams,
    ) -> Self {
        Self {
            winner,
            was_locked,
            total_volume,
            params,
        }
    }

    /// Returns the round's winner, if any trader placed a scored trade.
    #[must_use]
    pub const fn winner(&self) -> Option<Address> {
        self.winner
    }

    /// Returns `true` if the round ended by deviation breach.
    #[must_use]
    pub const fn was_locked(&self) -> bool {
        self.was_locked
    }

    /// Returns the round's total traded volume in regular units.
    #[must_use]
    pub const fn total_volume(&self) -> u64 {
        self.total_volume
    }

    /// Returns the round's curve parameters.
    #[must_use]
    pub const fn params(&self) -> CurveParams {
        self.params
    }
}

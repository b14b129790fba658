//! Per-trader deviation ledger entry.

use super::{Address, BasisPoints, Timestamp};

/// Accumulated accuracy record for one trader within one pool.
///
/// The running score is the arithmetic mean of every deviation sample the
/// trader has produced (`total_deviation / trade_count`), recomputed on
/// each trade. Lower is better; the pool's winner is the entry with the
/// lowest running score, ties broken by the most recent update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraderScore {
    trader: Address,
    total_deviation: BasisPoints,
    trade_count: u64,
    volume: u64,
    running_score: BasisPoints,
    last_updated: Timestamp,
}

impl TraderScore {
    /// Creates an empty ledger entry for `trader`.
    #[must_use]
    pub const fn new(trader: Address) -> Self {
        Self {
            trader,
            total_deviation: BasisPoints::ZERO,
            trade_count: 0,
            volume: 0,
            running_score: BasisPoints::ZERO,
            last_updated: Timestamp::ZERO,
        }
    }

    /// Folds one deviation sample into the ledger entry.
    pub fn record(&mut self, deviation: BasisPoints, volume: u64, now: Timestamp) {
        self.total_deviation = self.total_deviation.saturating_add(deviation);
        self.trade_count = self.trade_count.saturating_add(1);
        self.volume = self.volume.saturating_add(volume);
        self.running_score =
            BasisPoints::new(self.total_deviation.get() / u128::from(self.trade_count));
        self.last_updated = now;
    }

    /// Returns the trader's address.
    #[must_use]
    pub const fn trader(&self) -> Address {
        self.trader
    }

    /// Returns the sum of all deviation samples.
    #[must_use]
    pub const fn total_deviation(&self) -> BasisPoints {
        self.total_deviation
    }

    /// Returns how many trades this entry has folded in.
    #[must_use]
    pub const fn trade_count(&self) -> u64 {
        self.trade_count
    }

    /// Returns the trader's cumulative volume in regular units.
    #[must_use]
    pub const fn volume(&self) -> u64 {
        self.volume
    }

    /// Returns the mean deviation across all of this trader's samples.
    #[must_use]
    pub const fn running_score(&self) -> BasisPoints {
        self.running_score
    }

    /// Returns the timestamp of the most recent sample.
    #[must_use]
    pub const fn last_updated(&self) -> Timestamp {
        self.last_updated
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(tag: u8) -> Address {
        Address::from_bytes([tag; 32])
    }

    #[test]
    fn new_entry_is_empty() {
        let s = TraderScore::new(addr(1));
        assert_eq!(s.trade_count(), 0);
        assert_eq!(s.running_score(), BasisPoints::ZERO);
        assert_eq!(s.volume(), 0);
    }

    #[test]
    fn single_sample_is_its_own_mean() {
        let mut s = TraderScore::new(addr(1));
        s.record(BasisPoints::new(50), 1_000, Timestamp::from_secs(10));
        assert_eq!(s.running_score(), BasisPoints::new(50));
        assert_eq!(s.trade_count(), 1);
        assert_eq!(s.volume(), 1_000);
        assert_eq!(s.last_updated(), Timestamp::from_secs(10));
    }

    #[test]
    fn running_score_is_arithmetic_mean() {
        let mut s = TraderScore::new(addr(1));
        s.record(BasisPoints::new(50), 100, Timestamp::from_secs(10));
        s.record(BasisPoints::new(20), 100, Timestamp::from_secs(20));
        s.record(BasisPoints::new(80), 100, Timestamp::from_secs(30));
        // (50 + 20 + 80) / 3 = 50
        assert_eq!(s.running_score(), BasisPoints::new(50));
        assert_eq!(s.total_deviation(), BasisPoints::new(150));
        assert_eq!(s.trade_count(), 3);
    }

    #[test]
    fn mean_truncates_towards_zero() {
        let mut s = TraderScore::new(addr(1));
        s.record(BasisPoints::new(10), 1, Timestamp::from_secs(1));
        s.record(BasisPoints::new(5), 1, Timestamp::from_secs(2));
        // 15 / 2 = 7 (floor)
        assert_eq!(s.running_score(), BasisPoints::new(7));
    }

    #[test]
    fn accumulation_saturates() {
        let mut s = TraderScore::new(addr(1));
        s.record(BasisPoints::new(u128::MAX), 1, Timestamp::from_secs(1));
        s.record(BasisPoints::new(u128::MAX), 1, Timestamp::from_secs(2));
        assert_eq!(s.total_deviation(), BasisPoints::new(u128::MAX));
    }
}

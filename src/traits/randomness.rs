//! Randomness-oracle capability.

use core::fmt;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Handle for an outstanding randomness request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a request id from its raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// The request half of the verified-randomness contract.
///
/// The engine asks for `count` random words and continues synchronously;
/// delivery arrives later through
/// [`PoolRegistry::on_randomness_delivered`](crate::registry::PoolRegistry::on_randomness_delivered),
/// driven by whatever transport the deployment uses. The oracle never
/// calls back into the engine on its own.
pub trait RandomnessOracle {
    /// Requests `count` verified random words, mixing in `seed`.
    fn request(&mut self, count: u8, seed: u64) -> RequestId;
}

/// Deterministic oracle for tests and simulation.
///
/// Words are drawn from a ChaCha stream keyed by the request seed, so a
/// replayed scenario produces identical randomness. Deliveries are queued
/// until the harness drains them with [`take_pending`](Self::take_pending)
/// and feeds the registry.
#[derive(Debug, Clone, Default)]
pub struct SeededOracle {
    next_id: u64,
    pending: Vec<(RequestId, Vec<u64>)>,
}

impl SeededOracle {
    /// Creates an oracle with no outstanding requests.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Drains every queued delivery, oldest first.
    pub fn take_pending(&mut self) -> Vec<(RequestId, Vec<u64>)> {
        core::mem::take(&mut self.pending)
    }
}

impl RandomnessOracle for SeededOracle {
    fn request(&mut self, count: u8, seed: u64) -> RequestId {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let values = (0..count).map(|_| rng.next_u64()).collect();
        let id = RequestId::new(self.next_id);
        self.next_id += 1;
        self.pending.push((id, values));
        id
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn request_queues_delivery() {
        let mut oracle = SeededOracle::new();
        let id = oracle.request(2, 7);
        let pending = oracle.take_pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].0, id);
        assert_eq!(pending[0].1.len(), 2);
    }

    #[test]
    fn same_seed_same_words() {
        let mut a = SeededOracle::new();
        let mut b = SeededOracle::new();
        a.request(4, 99);
        b.request(4, 99);
        assert_eq!(a.take_pending()[0].1, b.take_pending()[0].1);
    }

    #[test]
    fn different_seeds_differ() {
        let mut oracle = SeededOracle::new();
        oracle.request(4, 1);
        oracle.request(4, 2);
        let pending = oracle.take_pending();
        assert_ne!(pending[0].1, pending[1].1);
    }

    #[test]
    fn ids_are_monotonic() {
        let mut oracle = SeededOracle::new();
        let a = oracle.request(1, 0);
        let b = oracle.request(1, 0);
        assert!(b > a);
    }

    #[test]
    fn take_pending_drains() {
        let mut oracle = SeededOracle::new();
        oracle.request(1, 0);
        assert_eq!(oracle.take_pending().len(), 1);
        assert!(oracle.take_pending().is_empty());
    }
}

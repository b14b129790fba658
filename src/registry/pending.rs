//! Stored continuation for an outstanding randomness request.

use crate::domain::Timestamp;
use crate::traits::RequestId;

/// Everything the launcher needs to resume round-chaining once verified
/// randomness arrives.
///
/// The next round's start time is captured here, when the request is
/// issued — never recomputed at delivery time, so a slow oracle cannot
/// shift the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRandomness {
    pool_id: u64,
    request_id: RequestId,
    scheduled_start: Timestamp,
}

impl PendingRandomness {
    pub(crate) const fn new(pool_id: u64, request_id: RequestId, scheduled_start: Timestamp) -> Self {
        Self {
            pool_id,
            request_id,
            scheduled_start,
        }
    }

    /// Returns the completed pool the request belongs to.
    #[must_use]
    pub const fn pool_id(&self) -> u64 {
        self.pool_id
    }

    /// Returns the oracle request handle.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the start time the next round was committed to.
    #[must_use]
    pub const fn scheduled_start(&self) -> Timestamp {
        self.scheduled_start
    }
}

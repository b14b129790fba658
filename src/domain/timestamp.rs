//! Second-resolution protocol time.

use core::fmt;
use core::time::Duration;

/// A point in protocol time, in whole seconds.
///
/// The engine never reads a wall clock: every operation that depends on
/// time takes the current `Timestamp` as an argument, which keeps trade
/// sequences fully deterministic and replayable.
///
/// # Examples
///
/// ```
/// use core::time::Duration;
/// use curvebound::domain::Timestamp;
///
/// let t = Timestamp::from_secs(100);
/// assert_eq!(t.saturating_add(Duration::from_secs(20)).get(), 120);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch origin.
    pub const ZERO: Self = Self(0);

    /// Creates a `Timestamp` from whole seconds.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the timestamp in whole seconds.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Adds a duration, saturating at the representable maximum.
    #[must_use]
    pub const fn saturating_add(&self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.as_secs()))
    }

    /// Returns the duration elapsed since `earlier`, or zero if `earlier`
    /// is in the future.
    #[must_use]
    pub const fn saturating_since(&self, earlier: Self) -> Duration {
        Duration::from_secs(self.0.saturating_sub(earlier.0))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

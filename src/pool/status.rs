//! Pool lifecycle states.

use core::fmt;

/// Lifecycle state of a pool.
///
/// ```text
/// Scheduled ──start_time──▶ Active ──┬─deviation breach─▶ Locked
///                                    └─finalize──────────▶ Completed
/// ```
///
/// `Locked` and `Completed` are terminal; a pool in either state rejects
/// every mutating call and stays queryable forever. `Active` means "has
/// started and is not terminal" — tradeability additionally requires the
/// current time to be inside the 24-hour window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolStatus {
    /// Created, before `start_time`.
    Scheduled,
    /// Started and not terminal.
    Active,
    /// Terminated by a deviation breach; reserves swept.
    Locked,
    /// Finalized after natural expiry.
    Completed,
}

impl PoolStatus {
    /// Returns `true` for the two terminal states.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Locked | Self::Completed)
    }
}

impl fmt::Display for PoolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Active => write!(f, "active"),
            Self::Locked => write!(f, "locked"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

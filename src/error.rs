//! Unified error types for the curvebound engine.
//!
//! All fallible operations across the crate return [`PoolError`] as their
//! error type. Every rejection happens before any state mutation — a failed
//! call leaves pools, registry, and collaborators untouched.
//!
//! Arithmetic saturation is deliberately *not* an error: the fixed-point
//! layer clamps instead of overflowing, and callers treat the clamped value
//! as a defined domain approximation.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, PoolError>;

/// Coarse classification of a [`PoolError`].
///
/// The engine never retries internally; the caller decides what to do with
/// each class (reject the request, back off, or escalate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A parameter was outside its documented range. Rejected before any
    /// state change.
    Validation,
    /// The operation is invalid for the target's current lifecycle state.
    State,
    /// A required resource (treasury funding, pool reserves) is missing.
    Resource,
    /// A reference or replay violated bookkeeping integrity.
    Integrity,
}

/// Error type for all pool, registry, and collaborator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// A parameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// A timestamp or delay violates the round-chaining rules.
    #[error("invalid timing: {0}")]
    InvalidTiming(&'static str),

    /// The pool cannot accept trades in its current state.
    #[error("pool not tradeable: {0}")]
    PoolNotTradeable(&'static str),

    /// The pool is already locked.
    #[error("pool is already locked")]
    AlreadyLocked,

    /// The pool has already been finalized.
    #[error("pool is already completed")]
    AlreadyCompleted,

    /// `finalize` was called before the trading window closed.
    #[error("pool has not yet ended")]
    PoolNotYetEnded,

    /// The referenced pool id is unknown to the registry.
    #[error("pool {0} not found")]
    NotFound(u64),

    /// The referenced pool id is not in the active set.
    #[error("pool {0} is not active")]
    NotActive(u64),

    /// A randomness delivery arrived for an id with no stored continuation,
    /// or the continuation was already consumed.
    #[error("no pending randomness request for pool {0}")]
    NoPendingRequest(u64),

    /// The treasury cannot cover the requested funding.
    #[error("insufficient treasury funding")]
    InsufficientFunding,

    /// A reserve required by the trade is zero or would be emptied.
    #[error("zero or exhausted reserves")]
    ZeroReserves,
}

impl PoolError {
    /// Maps the error onto the four-way taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter(_) | Self::InvalidTiming(_) => ErrorKind::Validation,
            Self::PoolNotTradeable(_)
            | Self::AlreadyLocked
            | Self::AlreadyCompleted
            | Self::PoolNotYetEnded
            | Self::NotActive(_) => ErrorKind::State,
            Self::InsufficientFunding | Self::ZeroReserves => ErrorKind::Resource,
            Self::NotFound(_) | Self::NoPendingRequest(_) => ErrorKind::Integrity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn kind_validation() {
        assert_eq!(
            PoolError::InvalidParameter("x").kind(),
            ErrorKind::Validation
        );
        assert_eq!(PoolError::InvalidTiming("x").kind(), ErrorKind::Validation);
    }

    #[test]
    fn kind_state() {
        assert_eq!(PoolError::AlreadyLocked.kind(), ErrorKind::State);
        assert_eq!(PoolError::AlreadyCompleted.kind(), ErrorKind::State);
        assert_eq!(PoolError::PoolNotYetEnded.kind(), ErrorKind::State);
        assert_eq!(PoolError::NotActive(3).kind(), ErrorKind::State);
        assert_eq!(PoolError::PoolNotTradeable("x").kind(), ErrorKind::State);
    }

    #[test]
    fn kind_resource() {
        assert_eq!(PoolError::InsufficientFunding.kind(), ErrorKind::Resource);
        assert_eq!(PoolError::ZeroReserves.kind(), ErrorKind::Resource);
    }

    #[test]
    fn kind_integrity() {
        assert_eq!(PoolError::NotFound(7).kind(), ErrorKind::Integrity);
        assert_eq!(PoolError::NoPendingRequest(7).kind(), ErrorKind::Integrity);
    }

    #[test]
    fn display_carries_detail() {
        let msg = format!(
            "{}",
            PoolError::InvalidParameter("quantity must be non-zero")
        );
        assert!(msg.contains("quantity must be non-zero"));
    }

    #[test]
    fn display_carries_pool_id() {
        let msg = format!("{}", PoolError::NoPendingRequest(42));
        assert!(msg.contains("42"));
    }
}

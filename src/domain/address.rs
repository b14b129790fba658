//! Chain-agnostic account address.

use core::fmt;

/// A generic, chain-agnostic address identifying a trader or pool account.
///
/// Wraps a fixed-size `[u8; 32]` byte array. All 32-byte sequences are
/// considered valid addresses, so construction is infallible.
///
/// # Examples
///
/// ```
/// use curvebound::domain::Address;
///
/// let addr = Address::from_bytes([1u8; 32]);
/// assert_eq!(addr.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero address.
    ///
    /// Useful as a sentinel or placeholder value; use sparingly.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Derives the reserved account address for a pool id.
    ///
    /// The id occupies the first eight bytes big-endian; the remaining
    /// bytes are zero. Pool ids are never reused, so derived addresses
    /// are unique.
    #[must_use]
    pub const fn for_pool(id: u64) -> Self {
        let mut bytes = [0u8; 32];
        let id_bytes = id.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[i] = id_bytes[i];
            i += 1;
        }
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "…")
    }
}

//! Treasury capability: the native-asset funding source and sink.

use crate::domain::FixedPoint;
use crate::error::{PoolError, Result};

/// The minimal treasury interface the engine depends on.
///
/// The real treasury (fee accounting, yield routing, governance
/// withdrawals) lives outside this crate; pools and the registry only
/// need to check the balance, draw seed liquidity, and push value back.
///
/// # Errors
///
/// Only [`fund_pool`](Self::fund_pool) can fail, with
/// [`PoolError::InsufficientFunding`] when the balance cannot cover the
/// request. Deposits are infallible and saturate at the representable
/// maximum.
pub trait Treasury {
    /// Returns the current native-asset balance, in scaled form.
    #[must_use]
    fn balance(&self) -> FixedPoint;

    /// Withdraws `amount` to seed a new pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InsufficientFunding`] if the balance is
    /// smaller than `amount`.
    fn fund_pool(&mut self, amount: FixedPoint) -> Result<()>;

    /// Deposits `amount` back into the treasury (trade fees, swept
    /// reserves of locked pools).
    fn deposit(&mut self, amount: FixedPoint);
}

/// In-memory treasury for tests and simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InMemoryTreasury {
    balance: FixedPoint,
}

impl InMemoryTreasury {
    /// Creates a treasury holding `balance`.
    #[must_use]
    pub const fn new(balance: FixedPoint) -> Self {
        Self { balance }
    }
}

impl Treasury for InMemoryTreasury {
    fn balance(&self) -> FixedPoint {
        self.balance
    }

    fn fund_pool(&mut self, amount: FixedPoint) -> Result<()> {
        if self.balance < amount {
            return Err(PoolError::InsufficientFunding);
        }
        self.balance = self.balance.saturating_sub(amount);
        Ok(())
    }

    fn deposit(&mut self, amount: FixedPoint) {
        self.balance = self.balance.saturating_add(amount);
    }
}

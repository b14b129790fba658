//! Pool-token ledger capability.

use std::collections::BTreeMap;

use crate::domain::{Address, FixedPoint};
use crate::error::{PoolError, Result};

/// Mint/burn/balance interface for the per-round pool token.
///
/// Account derivation, supply caps, and transfer mechanics belong to the
/// token-management collaborator; the engine only mints a round's reserve
/// at pool creation and burns whatever remains when a pool locks.
pub trait TokenLedger {
    /// Mints `amount` of the pool token to `account`.
    ///
    /// # Errors
    ///
    /// Implementations may refuse a mint (supply cap, frozen account);
    /// the in-memory ledger never does.
    fn mint(&mut self, account: Address, amount: FixedPoint) -> Result<()>;

    /// Burns `amount` of the pool token held by `account`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InsufficientFunding`] if `account` holds less
    /// than `amount`.
    fn burn(&mut self, account: Address, amount: FixedPoint) -> Result<()>;

    /// Returns the pool-token balance of `account`.
    #[must_use]
    fn balance_of(&self, account: Address) -> FixedPoint;
}

/// In-memory ledger for tests and simulation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    balances: BTreeMap<Address, FixedPoint>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            balances: BTreeMap::new(),
        }
    }
}

impl TokenLedger for InMemoryLedger {
    fn mint(&mut self, account: Address, amount: FixedPoint) -> Result<()> {
        let entry = self.balances.entry(account).or_insert(FixedPoint::ZERO);
        *entry = entry.saturating_add(amount);
        Ok(())
    }

    fn burn(&mut self, account: Address, amount: FixedPoint) -> Result<()> {
        let held = self.balance_of(account);
        if held < amount {
            return Err(PoolError::InsufficientFunding);
        }
        self.balances.insert(account, held.saturating_sub(amount));
        Ok(())
    }

    fn balance_of(&self, account: Address) -> FixedPoint {
        self.balances
            .get(&account)
            .copied()
            .unwrap_or(FixedPoint::ZERO)
    }
}

//! Round orchestration: the pool registry / launcher.
//!
//! The registry owns the sequence of pools and everything that spans
//! rounds: id allocation, the running curve height, the 24-hour chaining
//! rules, and the two-phase randomness continuation used when a round
//! locks without an organic winner.
//!
//! The registry is an explicit object — no ambient global state — so tests
//! and deployments can run any number of independent chains side by side.
//! It never spawns timers; an external automation layer calls
//! [`complete_pool`](PoolRegistry::complete_pool) and friends on its own
//! schedule, and the registry treats those calls like any other caller.

mod pending;

pub use pending::PendingRandomness;

use core::time::Duration;
use std::collections::BTreeMap;

use tracing::info;

use crate::config::{CurveParams, HeightRule};
use crate::domain::{
    Address, BasisPoints, FixedPoint, Side, TickerInterval, Timestamp, TradeReceipt,
};
use crate::error::{PoolError, Result};
use crate::pool::{Pool, MAX_START_DELAY, ROUND_DURATION};
use crate::traits::{RandomnessOracle, TokenLedger, Treasury};

/// Random words requested per locked round: one for the candle size, one
/// for the threshold jitter.
const RANDOM_WORDS_PER_ROUND: u8 = 2;

/// Half-width of the randomized threshold jitter, in basis points.
const THRESHOLD_JITTER_BP: u64 = 100;

/// Registry-wide settings, fixed at construction.
///
/// # Validation
///
/// Genesis height, seed funding, and token supply must be non-zero; the
/// trade fee must be a percentage strictly below 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    genesis_height: FixedPoint,
    height_rule: HeightRule,
    seed_funding: FixedPoint,
    token_supply: FixedPoint,
    fee: BasisPoints,
}

impl RegistryConfig {
    /// Creates a new `RegistryConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidParameter`] if any invariant fails.
    pub const fn new(
        genesis_height: FixedPoint,
        height_rule: HeightRule,
        seed_funding: FixedPoint,
        token_supply: FixedPoint,
        fee: BasisPoints,
    ) -> Result<Self> {
        let config = Self {
            genesis_height,
            height_rule,
            seed_funding,
            token_supply,
            fee,
        };
        match config.validate() {
            Ok(()) => Ok(config),
            Err(e) => Err(e),
        }
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidParameter`] if any invariant fails.
    pub const fn validate(&self) -> Result<()> {
        if self.genesis_height.is_zero() {
            return Err(PoolError::InvalidParameter(
                "genesis height must be non-zero",
            ));
        }
        if self.seed_funding.is_zero() {
            return Err(PoolError::InvalidParameter("seed funding must be non-zero"));
        }
        if self.token_supply.is_zero() {
            return Err(PoolError::InvalidParameter("token supply must be non-zero"));
        }
        if self.fee.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(PoolError::InvalidParameter("trade fee must be below 100%"));
        }
        Ok(())
    }

    /// Returns the first round's curve height.
    #[must_use]
    pub const fn genesis_height(&self) -> FixedPoint {
        self.genesis_height
    }

    /// Returns the cross-round height recurrence.
    #[must_use]
    pub const fn height_rule(&self) -> HeightRule {
        self.height_rule
    }

    /// Returns the native-asset seed per round.
    #[must_use]
    pub const fn seed_funding(&self) -> FixedPoint {
        self.seed_funding
    }

    /// Returns the pool-token supply minted per round.
    #[must_use]
    pub const fn token_supply(&self) -> FixedPoint {
        self.token_supply
    }

    /// Returns the per-trade fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }
}

/// Coarse launcher phase, derived from the registry's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LauncherPhase {
    /// No active pool and nothing pending.
    Idle,
    /// At least one pool is accepting (or awaiting) trades.
    PoolActive,
    /// Waiting on a randomness delivery to chain the next round.
    PendingRandomness,
}

/// Orchestrates the chained sequence of pools.
///
/// Generic over the three collaborator capabilities so deployments plug in
/// their own custody, issuance, and randomness transports; the in-memory
/// implementations in [`crate::traits`] serve tests and simulation.
///
/// All mutating methods take `&mut self`: registry-level bookkeeping is a
/// single-writer critical section by construction. Individual pools can
/// still be driven in parallel by separate registries, which share no
/// state.
#[derive(Debug)]
pub struct PoolRegistry<T, R, L> {
    config: RegistryConfig,
    treasury: T,
    oracle: R,
    ledger: L,
    pools: BTreeMap<u64, Pool>,
    active: Vec<u64>,
    completed: Vec<u64>,
    height_history: Vec<FixedPoint>,
    current_height: FixedPoint,
    next_pool_id: u64,
    last_end: Option<Timestamp>,
    pending: BTreeMap<u64, PendingRandomness>,
}

impl<T, R, L> PoolRegistry<T, R, L>
where
    T: Treasury,
    R: RandomnessOracle,
    L: TokenLedger,
{
    /// Creates an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidParameter`] if `config` is invalid.
    pub fn new(config: RegistryConfig, treasury: T, oracle: R, ledger: L) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            current_height: config.genesis_height(),
            config,
            treasury,
            oracle,
            ledger,
            pools: BTreeMap::new(),
            active: Vec::new(),
            completed: Vec::new(),
            height_history: Vec::new(),
            next_pool_id: 0,
            last_end: None,
            pending: BTreeMap::new(),
        })
    }

    /// Creates a new pool with caller-chosen parameters.
    ///
    /// The raw scalars are validated at this boundary: `ticker_minutes`
    /// must be in {5, 10, 15}, `threshold_bp` in `(0, 5000]`, and
    /// `start_delay` at most 24 hours. The proposed start must also fall
    /// inside the previous round's 12-hour grace window.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidParameter`] for out-of-range scalars.
    /// - [`PoolError::InvalidTiming`] for a start outside the chain window.
    /// - [`PoolError::InsufficientFunding`] if the treasury cannot seed
    ///   the pool.
    pub fn create_new_pool(
        &mut self,
        ticker_minutes: u8,
        threshold_bp: u16,
        start_delay: Duration,
        now: Timestamp,
    ) -> Result<u64> {
        let ticker = TickerInterval::from_minutes(ticker_minutes)?;
        let threshold = BasisPoints::new(u128::from(threshold_bp));
        if start_delay > ROUND_DURATION {
            return Err(PoolError::InvalidTiming("start delay exceeds 24 hours"));
        }
        let proposed_start = now.saturating_add(start_delay);
        self.check_chain_window(proposed_start)?;
        self.spawn_pool(ticker, threshold, proposed_start)
    }

    /// Routes one trade to an active pool.
    ///
    /// `proposed_candle_size` is the raw minute count and is validated
    /// here, before the pool is touched.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotFound`] for an unknown id.
    /// - Everything [`Pool::trade`] can return.
    #[allow(clippy::too_many_arguments)]
    pub fn trade(
        &mut self,
        pool_id: u64,
        trader: Address,
        quantity: u64,
        side: Side,
        proposed_delay: Duration,
        proposed_candle_size: u8,
        now: Timestamp,
    ) -> Result<TradeReceipt> {
        let candle_size = TickerInterval::from_minutes(proposed_candle_size)?;
        let Some(pool) = self.pools.get_mut(&pool_id) else {
            return Err(PoolError::NotFound(pool_id));
        };
        pool.trade(
            trader,
            quantity,
            side,
            proposed_delay,
            candle_size,
            now,
            &mut self.treasury,
            &mut self.ledger,
        )
    }

    /// Explicitly locks an active pool.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotFound`] / [`PoolError::NotActive`] for bad ids.
    /// - Everything [`Pool::lock`] can return.
    pub fn lock_pool(&mut self, pool_id: u64, reason: &str) -> Result<()> {
        if !self.pools.contains_key(&pool_id) {
            return Err(PoolError::NotFound(pool_id));
        }
        if !self.active.contains(&pool_id) {
            return Err(PoolError::NotActive(pool_id));
        }
        let Some(pool) = self.pools.get_mut(&pool_id) else {
            return Err(PoolError::NotFound(pool_id));
        };
        pool.lock(reason, &mut self.treasury, &mut self.ledger)
    }

    /// Finalizes an active pool and chains the next round.
    ///
    /// With an organic winner, the next pool is created immediately from
    /// the winner's proposed delay and candle size. A locked round (or a
    /// round nobody traded in) has no organic winner: the registry
    /// requests two random words and stores a continuation; the next pool
    /// is created when [`on_randomness_delivered`](Self::on_randomness_delivered)
    /// consumes it.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotFound`] / [`PoolError::NotActive`] for bad ids.
    /// - Everything [`Pool::finalize`] can return.
    pub fn complete_pool(&mut self, pool_id: u64, now: Timestamp) -> Result<()> {
        if !self.pools.contains_key(&pool_id) {
            return Err(PoolError::NotFound(pool_id));
        }
        let Some(position) = self.active.iter().position(|&id| id == pool_id) else {
            return Err(PoolError::NotActive(pool_id));
        };
        let Some(pool) = self.pools.get_mut(&pool_id) else {
            return Err(PoolError::NotFound(pool_id));
        };

        // A round with an organic winner chains immediately, so the seed
        // for the next pool must be available before anything is committed.
        let chains_directly = !pool.is_locked() && !pool.scores().is_empty();
        let required = self
            .config
            .seed_funding()
            .saturating_add(self.config.seed_funding());
        if chains_directly && self.treasury.balance() < required {
            return Err(PoolError::InsufficientFunding);
        }

        let outcome = pool.finalize(now)?;
        let end_time = pool.end_time();
        let winner_delay = pool.winner_delay();
        let winner_ticker = pool.winner_candle_size();
        let threshold = pool.params().threshold();

        self.active.remove(position);
        self.completed.push(pool_id);

        if outcome.was_locked() || outcome.winner().is_none() {
            // No organic winner — park a continuation and wait for the
            // oracle. The next round holds the 24-hour cadence even when
            // the pool locked early.
            let scheduled_start = end_time;
            let request_id = self
                .oracle
                .request(RANDOM_WORDS_PER_ROUND, pool_id);
            self.pending.insert(
                pool_id,
                PendingRandomness::new(pool_id, request_id, scheduled_start),
            );
            info!(
                pool = pool_id,
                request = %request_id,
                start = %scheduled_start,
                "round had no organic winner; awaiting randomness"
            );
            Ok(())
        } else {
            let start = end_time.saturating_add(winner_delay);
            let next = self.spawn_pool(winner_ticker, threshold, start)?;
            info!(
                pool = pool_id,
                next,
                "round chained from winner's parameters"
            );
            Ok(())
        }
    }

    /// Consumes a randomness delivery and creates the deferred next pool.
    ///
    /// Exactly-once: the stored continuation is removed on success, and a
    /// second delivery for the same id is rejected. A malformed delivery
    /// (fewer than two words) leaves the continuation in place so the
    /// oracle can redeliver.
    ///
    /// Returns the new pool's id.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NoPendingRequest`] for unknown or already-consumed
    ///   ids.
    /// - [`PoolError::InvalidParameter`] for a short delivery.
    /// - [`PoolError::InsufficientFunding`] if the treasury cannot seed
    ///   the new pool (the continuation is retained).
    pub fn on_randomness_delivered(&mut self, pool_id: u64, values: &[u64]) -> Result<u64> {
        if !self.pending.contains_key(&pool_id) {
            return Err(PoolError::NoPendingRequest(pool_id));
        }
        if values.len() < usize::from(RANDOM_WORDS_PER_ROUND) {
            return Err(PoolError::InvalidParameter(
                "randomness delivery needs at least two words",
            ));
        }
        let Some(pending) = self.pending.remove(&pool_id) else {
            return Err(PoolError::NoPendingRequest(pool_id));
        };

        let ticker = TickerInterval::from_random_word(values[0]);
        let threshold = jittered_threshold(values[1]);
        match self.spawn_pool(ticker, threshold, pending.scheduled_start()) {
            Ok(next) => {
                info!(
                    pool = pool_id,
                    next,
                    ticker = %ticker,
                    threshold = %threshold,
                    "round chained from delivered randomness"
                );
                Ok(next)
            }
            Err(e) => {
                // Spawning failed before any registry mutation; keep the
                // continuation so delivery can be retried.
                self.pending.insert(pool_id, pending);
                Err(e)
            }
        }
    }

    // -- internals ----------------------------------------------------------

    /// Enforces `proposed_start ≤ previous_end + 12h` against the most
    /// recently created round.
    fn check_chain_window(&self, proposed_start: Timestamp) -> Result<()> {
        if let Some(previous_end) = self.last_end {
            if proposed_start > previous_end.saturating_add(MAX_START_DELAY) {
                return Err(PoolError::InvalidTiming(
                    "start exceeds the previous round's grace window",
                ));
            }
        }
        Ok(())
    }

    /// Allocates an id, advances the running height, seeds and registers
    /// a pool. All fallible steps run before any registry mutation.
    fn spawn_pool(
        &mut self,
        ticker: TickerInterval,
        threshold: BasisPoints,
        start_time: Timestamp,
    ) -> Result<u64> {
        let height = if self.next_pool_id == 0 {
            self.config.genesis_height()
        } else {
            self.config
                .height_rule()
                .next_height(self.current_height, ticker.candle_count())
        };
        let params = CurveParams::new(height, ticker, threshold, self.config.fee())?;

        let id = self.next_pool_id;
        let pool = Pool::create(
            id,
            params,
            self.config.seed_funding(),
            self.config.token_supply(),
            start_time,
            &mut self.treasury,
            &mut self.ledger,
        )?;

        self.next_pool_id += 1;
        self.current_height = height;
        self.height_history.push(height);
        self.last_end = Some(pool.end_time());
        self.active.push(id);
        self.pools.insert(id, pool);
        Ok(id)
    }

    // -- queries ------------------------------------------------------------

    /// Returns a pool by id; completed and locked pools stay queryable.
    #[must_use]
    pub fn pool(&self, pool_id: u64) -> Option<&Pool> {
        self.pools.get(&pool_id)
    }

    /// Returns the ids of active pools, oldest first.
    #[must_use]
    pub fn active_pools(&self) -> &[u64] {
        &self.active
    }

    /// Returns the ids of completed pools, in completion order.
    #[must_use]
    pub fn completed_pools(&self) -> &[u64] {
        &self.completed
    }

    /// Returns the running curve height.
    #[must_use]
    pub const fn current_height(&self) -> FixedPoint {
        self.current_height
    }

    /// Returns every round's height, indexed by pool id.
    #[must_use]
    pub fn height_history(&self) -> &[FixedPoint] {
        &self.height_history
    }

    /// Returns the stored continuation for a locked round, if any.
    #[must_use]
    pub fn pending_request(&self, pool_id: u64) -> Option<&PendingRandomness> {
        self.pending.get(&pool_id)
    }

    /// Returns the launcher's coarse phase.
    #[must_use]
    pub fn phase(&self) -> LauncherPhase {
        if !self.active.is_empty() {
            LauncherPhase::PoolActive
        } else if !self.pending.is_empty() {
            LauncherPhase::PendingRandomness
        } else {
            LauncherPhase::Idle
        }
    }

    /// Returns the treasury collaborator.
    #[must_use]
    pub const fn treasury(&self) -> &T {
        &self.treasury
    }

    /// Returns the token-ledger collaborator.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns the randomness-oracle collaborator.
    ///
    /// Mutable because test harnesses drain queued deliveries from it.
    pub fn oracle_mut(&mut self) -> &mut R {
        &mut self.oracle
    }
}

/// Maps a random word onto a threshold jittered around the protocol
/// default: `690 ± 100` basis points, always inside `(0, 5000]`.
const fn jittered_threshold(word: u64) -> BasisPoints {
    let base = BasisPoints::DEFAULT_THRESHOLD.get() as u64 - THRESHOLD_JITTER_BP;
    BasisPoints::new((base + word % (2 * THRESHOLD_JITTER_BP + 1)) as u128)
}

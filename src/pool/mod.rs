//! The pool state machine: trade execution plus curve-deviation scoring.
//!
//! A [`Pool`] is one 24-hour trading round. It runs two clocks at once:
//!
//! - **Continuous time** — every trade moves the constant-product reserves
//!   immediately.
//! - **Candle time** — the round is divided into a fixed grid of candles;
//!   deviation against the bonded curve is *scored* on every trade but
//!   *enforced* (threshold → lock) at most once per candle.
//!
//! The pool never reads a wall clock; callers pass the current
//! [`Timestamp`] into every time-dependent operation, which keeps whole
//! trade sequences deterministic and replayable.

mod outcome;
mod status;

#[cfg(test)]
mod proptest_properties;

pub use outcome::PoolOutcome;
pub use status::PoolStatus;

use core::time::Duration;

use tracing::{debug, info, warn};

use crate::config::CurveParams;
use crate::domain::{
    Address, BasisPoints, FixedPoint, Rounding, Side, TickerInterval, Timestamp, TradeReceipt,
    TraderScore,
};
use crate::error::{PoolError, Result};
use crate::math::{amm_output, curve_value, deviation_bps};
use crate::traits::{TokenLedger, Treasury};

/// Length of one trading round.
pub const ROUND_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Upper bound on a proposed start delay for the next round.
pub const MAX_START_DELAY: Duration = Duration::from_secs(12 * 60 * 60);

/// One trading round: AMM reserves, deviation ledger, and lifecycle flags.
///
/// Mutated exclusively through [`trade`](Self::trade), [`lock`](Self::lock),
/// and [`finalize`](Self::finalize); every rejected call leaves the pool
/// untouched. Once terminal the pool is immutable and remains queryable.
///
/// All methods take `&mut self`, so exclusive access per pool is enforced
/// by the borrow checker; callers that share a pool across threads wrap it
/// in a mutex. Distinct pools share no state and may run fully in parallel.
#[derive(Debug, Clone)]
pub struct Pool {
    id: u64,
    params: CurveParams,
    start_time: Timestamp,
    end_time: Timestamp,
    token_account: Address,
    x_reserve: FixedPoint,
    y_reserve: FixedPoint,
    locked: bool,
    completed: bool,
    total_trades: u64,
    total_volume: u64,
    // Insertion-ordered so winner search is deterministic.
    scores: Vec<TraderScore>,
    current_winner: Option<Address>,
    winner_delay: Duration,
    winner_candle_size: TickerInterval,
    last_checked_candle: Option<u64>,
}

impl Pool {
    /// Creates and seeds a new pool.
    ///
    /// The treasury must hold at least twice the seed so the chain can
    /// always fund the following round; the seed itself becomes the
    /// native-asset reserve. The round's pool-token supply is minted to
    /// the pool's reserved account through the [`TokenLedger`].
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidParameter`] for zero seed or supply, or
    ///   invalid `params`.
    /// - [`PoolError::InsufficientFunding`] if the treasury balance is
    ///   below `2 × seed_funding`.
    pub fn create<T, L>(
        id: u64,
        params: CurveParams,
        seed_funding: FixedPoint,
        token_supply: FixedPoint,
        start_time: Timestamp,
        treasury: &mut T,
        ledger: &mut L,
    ) -> Result<Self>
    where
        T: Treasury,
        L: TokenLedger,
    {
        params.validate()?;
        if seed_funding.is_zero() {
            return Err(PoolError::InvalidParameter("seed funding must be non-zero"));
        }
        if token_supply.is_zero() {
            return Err(PoolError::InvalidParameter("token supply must be non-zero"));
        }
        let required = seed_funding.saturating_add(seed_funding);
        if treasury.balance() < required {
            return Err(PoolError::InsufficientFunding);
        }

        let token_account = Address::for_pool(id);
        ledger.mint(token_account, token_supply)?;
        treasury.fund_pool(seed_funding)?;

        let end_time = start_time.saturating_add(ROUND_DURATION);
        info!(
            pool = id,
            start = %start_time,
            height = %params.height(),
            candles = params.candle_count(),
            "pool created"
        );

        Ok(Self {
            id,
            params,
            start_time,
            end_time,
            token_account,
            x_reserve: seed_funding,
            y_reserve: token_supply,
            locked: false,
            completed: false,
            total_trades: 0,
            total_volume: 0,
            scores: Vec::new(),
            current_winner: None,
            winner_delay: Duration::ZERO,
            winner_candle_size: params.ticker(),
            last_checked_candle: None,
        })
    }

    /// Executes one trade against the pool.
    ///
    /// The fee is deducted from the input before the pricing formula; the
    /// net input moves the reserves by the constant-product rule, and the
    /// realized output is scored against the *next* candle's curve
    /// expectation. A deviation above the threshold at a fresh candle
    /// boundary locks the pool: the remaining pool-token reserve is
    /// burned, the native reserve is swept to the treasury, and both
    /// reserves become zero.
    ///
    /// All guards run before any state changes — a rejected trade has no
    /// side effects anywhere.
    ///
    /// # Errors
    ///
    /// - [`PoolError::PoolNotTradeable`] outside the window or in a
    ///   terminal state.
    /// - [`PoolError::InvalidParameter`] for a zero quantity, a delay
    ///   above 12 hours, or an input fully consumed by the fee.
    /// - [`PoolError::ZeroReserves`] when the fill would be empty or
    ///   would exhaust the counter-reserve.
    #[allow(clippy::too_many_arguments)]
    pub fn trade<T, L>(
        &mut self,
        trader: Address,
        quantity: u64,
        side: Side,
        proposed_delay: Duration,
        proposed_candle_size: TickerInterval,
        now: Timestamp,
        treasury: &mut T,
        ledger: &mut L,
    ) -> Result<TradeReceipt>
    where
        T: Treasury,
        L: TokenLedger,
    {
        if self.locked {
            return Err(PoolError::PoolNotTradeable("pool is locked"));
        }
        if self.completed {
            return Err(PoolError::PoolNotTradeable("pool is completed"));
        }
        if now < self.start_time {
            return Err(PoolError::PoolNotTradeable("pool has not started"));
        }
        if now > self.end_time {
            return Err(PoolError::PoolNotTradeable("trading window has closed"));
        }
        if proposed_delay > MAX_START_DELAY {
            return Err(PoolError::InvalidParameter(
                "proposed delay exceeds 12 hours",
            ));
        }
        if quantity == 0 {
            return Err(PoolError::InvalidParameter("quantity must be non-zero"));
        }

        let quantity_scaled = FixedPoint::from_regular(u128::from(quantity));
        let fee = self.params.fee().apply(quantity_scaled, Rounding::Up);
        let net_input = quantity_scaled.saturating_sub(fee);
        if net_input.is_zero() {
            return Err(PoolError::InvalidParameter(
                "input is consumed entirely by the fee",
            ));
        }

        let (reserve_in, reserve_out) = match side {
            Side::Buy => (self.x_reserve, self.y_reserve),
            Side::Sell => (self.y_reserve, self.x_reserve),
        };
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(PoolError::ZeroReserves);
        }
        let amount_out = amm_output(net_input, reserve_in, reserve_out);
        if amount_out.is_zero() || amount_out >= reserve_out {
            return Err(PoolError::ZeroReserves);
        }

        let candle = self.candle_index(now);
        let expected = curve_value(candle + 1, self.params.height(), self.params.candle_count());
        let deviation = deviation_bps(amount_out, expected);

        // Guards done — mutate.
        let new_reserve_in = reserve_in.saturating_add(net_input);
        let new_reserve_out = reserve_out.saturating_sub(amount_out);
        match side {
            Side::Buy => {
                self.x_reserve = new_reserve_in;
                self.y_reserve = new_reserve_out;
            }
            Side::Sell => {
                self.y_reserve = new_reserve_in;
                self.x_reserve = new_reserve_out;
            }
        }
        self.total_trades = self.total_trades.saturating_add(1);
        self.total_volume = self.total_volume.saturating_add(quantity);
        treasury.deposit(fee);

        self.record_score(trader, deviation, quantity, now);
        let new_winner = self.refresh_winner(trader, proposed_delay, proposed_candle_size);

        let fresh_candle = self.last_checked_candle != Some(candle);
        let mut locked_now = false;
        if fresh_candle {
            self.last_checked_candle = Some(candle);
            if deviation > self.params.threshold() {
                self.sweep_and_lock("deviation threshold breached", treasury, ledger)?;
                locked_now = true;
            }
        }

        debug!(
            pool = self.id,
            trader = %trader,
            side = %side,
            quantity,
            out = %amount_out,
            deviation = %deviation,
            candle,
            "trade executed"
        );

        TradeReceipt::new(
            amount_out,
            fee,
            deviation,
            candle,
            fresh_candle,
            new_winner,
            locked_now,
        )
    }

    /// Explicitly locks the pool.
    ///
    /// Used by external automation when an offline, whole-round deviation
    /// aggregate exceeds the threshold — independent of the per-candle
    /// check inside [`trade`](Self::trade).
    ///
    /// # Errors
    ///
    /// - [`PoolError::AlreadyLocked`] on a second lock.
    /// - [`PoolError::AlreadyCompleted`] once finalized.
    pub fn lock<T, L>(&mut self, reason: &str, treasury: &mut T, ledger: &mut L) -> Result<()>
    where
        T: Treasury,
        L: TokenLedger,
    {
        if self.locked {
            return Err(PoolError::AlreadyLocked);
        }
        if self.completed {
            return Err(PoolError::AlreadyCompleted);
        }
        self.sweep_and_lock(reason, treasury, ledger)
    }

    /// Finalizes the pool and reports its outcome.
    ///
    /// For a naturally expired pool the winner is selected over the full
    /// ledger (lowest mean deviation, ties to the most recent update); a
    /// locked pool reports the provisional winner that was live at lock
    /// time. Calling `finalize` twice fails without further mutation.
    ///
    /// # Errors
    ///
    /// - [`PoolError::AlreadyCompleted`] on repeat calls.
    /// - [`PoolError::PoolNotYetEnded`] before `end_time` on an unlocked
    ///   pool.
    pub fn finalize(&mut self, now: Timestamp) -> Result<PoolOutcome> {
        if self.completed {
            return Err(PoolError::AlreadyCompleted);
        }
        if !self.locked && now <= self.end_time {
            return Err(PoolError::PoolNotYetEnded);
        }

        let winner = if self.locked {
            self.current_winner
        } else {
            self.best_score().map(TraderScore::trader)
        };
        self.completed = true;
        info!(
            pool = self.id,
            winner = ?winner,
            was_locked = self.locked,
            volume = self.total_volume,
            "pool finalized"
        );
        Ok(PoolOutcome::new(
            winner,
            self.locked,
            self.total_volume,
            self.params,
        ))
    }

    // -- internals ----------------------------------------------------------

    /// Burns the pool-token reserve, sweeps the native reserve to the
    /// treasury, and flips the lock flag. Reserves are zero afterwards.
    fn sweep_and_lock<T, L>(&mut self, reason: &str, treasury: &mut T, ledger: &mut L) -> Result<()>
    where
        T: Treasury,
        L: TokenLedger,
    {
        let held = ledger.balance_of(self.token_account);
        if !held.is_zero() {
            ledger.burn(self.token_account, held)?;
        }
        if !self.x_reserve.is_zero() {
            treasury.deposit(self.x_reserve);
        }
        self.x_reserve = FixedPoint::ZERO;
        self.y_reserve = FixedPoint::ZERO;
        self.locked = true;
        warn!(pool = self.id, reason, "pool locked");
        Ok(())
    }

    fn record_score(&mut self, trader: Address, deviation: BasisPoints, volume: u64, now: Timestamp) {
        if let Some(entry) = self.scores.iter_mut().find(|s| s.trader() == trader) {
            entry.record(deviation, volume, now);
            return;
        }
        let mut entry = TraderScore::new(trader);
        entry.record(deviation, volume, now);
        self.scores.push(entry);
    }

    /// Promotes `trader` to provisional winner if they now hold the best
    /// score. Returns `true` when the winner pointer changed.
    fn refresh_winner(
        &mut self,
        trader: Address,
        proposed_delay: Duration,
        proposed_candle_size: TickerInterval,
    ) -> bool {
        let Some(best) = self.best_score() else {
            return false;
        };
        if best.trader() != trader {
            return false;
        }
        let score = best.running_score();
        let changed = self.current_winner != Some(trader);
        self.current_winner = Some(trader);
        self.winner_delay = proposed_delay;
        self.winner_candle_size = proposed_candle_size;
        if changed {
            info!(
                pool = self.id,
                winner = %trader,
                score = %score,
                "new provisional winner"
            );
        }
        changed
    }

    /// Lowest mean deviation wins; equal means go to the most recent
    /// update; remaining ties keep the earlier ledger entry.
    fn best_score(&self) -> Option<&TraderScore> {
        let mut best: Option<&TraderScore> = None;
        for score in &self.scores {
            let better = match best {
                None => true,
                Some(current) => {
                    score.running_score() < current.running_score()
                        || (score.running_score() == current.running_score()
                            && score.last_updated() > current.last_updated())
                }
            };
            if better {
                best = Some(score);
            }
        }
        best
    }

    // -- queries ------------------------------------------------------------

    /// Returns the pool id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the round's curve parameters.
    #[must_use]
    pub const fn params(&self) -> CurveParams {
        self.params
    }

    /// Returns the start of the trading window.
    #[must_use]
    pub const fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// Returns the end of the trading window.
    #[must_use]
    pub const fn end_time(&self) -> Timestamp {
        self.end_time
    }

    /// Returns the native-asset reserve.
    #[must_use]
    pub const fn x_reserve(&self) -> FixedPoint {
        self.x_reserve
    }

    /// Returns the pool-token reserve.
    #[must_use]
    pub const fn y_reserve(&self) -> FixedPoint {
        self.y_reserve
    }

    /// Returns the pool's reserved token account.
    #[must_use]
    pub const fn token_account(&self) -> Address {
        self.token_account
    }

    /// Returns `true` once the pool is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns `true` once the pool is finalized.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the lifecycle state as seen at `now`.
    #[must_use]
    pub const fn status(&self, now: Timestamp) -> PoolStatus {
        if self.locked {
            PoolStatus::Locked
        } else if self.completed {
            PoolStatus::Completed
        } else if now.get() < self.start_time.get() {
            PoolStatus::Scheduled
        } else {
            PoolStatus::Active
        }
    }

    /// Returns `true` if a trade at `now` would pass the state guards.
    #[must_use]
    pub const fn is_tradeable(&self, now: Timestamp) -> bool {
        !self.locked
            && !self.completed
            && now.get() >= self.start_time.get()
            && now.get() <= self.end_time.get()
    }

    /// Returns the candle index for `now`, clamped into the round's grid.
    #[must_use]
    pub fn candle_index(&self, now: Timestamp) -> u64 {
        let elapsed = now.saturating_since(self.start_time).as_secs();
        let candle = elapsed / self.params.candle_duration().as_secs();
        candle.min(self.params.candle_count() - 1)
    }

    /// Returns the number of executed trades.
    #[must_use]
    pub const fn total_trades(&self) -> u64 {
        self.total_trades
    }

    /// Returns the cumulative traded volume in regular units.
    #[must_use]
    pub const fn total_volume(&self) -> u64 {
        self.total_volume
    }

    /// Returns every trader's ledger entry, in insertion order.
    #[must_use]
    pub fn scores(&self) -> &[TraderScore] {
        &self.scores
    }

    /// Returns one trader's ledger entry, if they have traded.
    #[must_use]
    pub fn score_of(&self, trader: Address) -> Option<&TraderScore> {
        self.scores.iter().find(|s| s.trader() == trader)
    }

    /// Returns the provisional winner.
    #[must_use]
    pub const fn current_winner(&self) -> Option<Address> {
        self.current_winner
    }

    /// Returns the provisional winner's proposed start delay.
    #[must_use]
    pub const fn winner_delay(&self) -> Duration {
        self.winner_delay
    }

    /// Returns the provisional winner's proposed candle size.
    #[must_use]
    pub const fn winner_candle_size(&self) -> TickerInterval {
        self.winner_candle_size
    }
}

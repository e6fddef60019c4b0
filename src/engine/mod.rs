//! Pool registry and the four state-changing operations.
//!
//! [`PoolEngine`] owns every pool, keyed by the unordered [`PairKey`] of its
//! assets, together with a [`Ledger`] and an [`AddressDeriver`].  Each
//! operation runs the same sequence:
//!
//! 1. **Validate** inputs and look the pool up.
//! 2. **Compute** the reserve and share changes with the pure curve
//!    functions in [`pool`](crate::pool).
//! 3. **Apply** them through [`Pool::apply_delta`], the only mutation path.
//! 4. **Settle** by sending the matching [`LedgerInstruction`] batch.
//!
//! Steps 1 to 3 fail before anything moves.  If step 4 fails, the pool is
//! restored from a snapshot taken before step 3 and the ledger's error is
//! returned, so a rejected operation never leaves reserves out of step
//! with the vaults.
//!
//! # Examples
//!
//! ```
//! use pair_amm::prelude::*;
//!
//! let sol = AssetId::from_bytes([1u8; 32]);
//! let usdc = AssetId::from_bytes([2u8; 32]);
//! let alice = Address::from_bytes([10u8; 32]);
//!
//! let mut engine = PoolEngine::new(
//!     EngineConfig::default(),
//!     InMemoryLedger::new(),
//!     SeededAddressDeriver::default(),
//! )
//! .expect("valid config");
//!
//! let key = engine.initialize(sol, usdc).expect("new pair");
//! engine.ledger_mut().credit(alice, sol, Amount::new(1_000_000)).expect("fund");
//! engine.ledger_mut().credit(alice, usdc, Amount::new(1_000_000)).expect("fund");
//!
//! let dep = engine
//!     .add_liquidity(&key, alice, Amount::new(500_000), Amount::new(500_000))
//!     .expect("deposit");
//! assert_eq!(dep.minted, Shares::new(500_000));
//!
//! let quote = engine.quote_swap(&key, Side::A, Amount::new(10_000)).expect("quote");
//! let out = engine
//!     .swap(&key, alice, Side::A, Amount::new(10_000), quote.amount_out)
//!     .expect("swap");
//! assert_eq!(out.amount_out, quote.amount_out);
//! ```

mod outcome;
#[cfg(test)]
mod proptest_properties;

use std::collections::HashMap;

use tracing::{debug, info, instrument, warn};

pub use outcome::{DepositOutcome, SwapOutcome, WithdrawalOutcome};

use crate::config::{EngineConfig, RatioPolicy};
use crate::domain::{Address, Amount, AssetId, AssetPair, FeeTier, PairKey, Shares, Side};
use crate::error::{AmmError, LedgerError};
use crate::pool::{
    amounts_for_shares, check_deposit_ratio, shares_for_deposit, swap_output, Pool, PoolDelta,
    PoolRecord, SwapQuote,
};
use crate::traits::{AddressDeriver, Ledger, LedgerInstruction, PoolAddresses};

#[derive(Debug, Clone)]
struct PoolEntry {
    pool: Pool,
    addresses: PoolAddresses,
}

/// Registry of pools plus the collaborators needed to settle operations.
#[derive(Debug)]
pub struct PoolEngine<L, D> {
    fee_tier: FeeTier,
    ratio_policy: RatioPolicy,
    ledger: L,
    deriver: D,
    pools: HashMap<PairKey, PoolEntry>,
}

impl<L: Ledger, D: AddressDeriver> PoolEngine<L, D> {
    /// Creates an engine with no pools.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidFee`] if the configured fee is 100% or more.
    pub fn new(config: EngineConfig, ledger: L, deriver: D) -> Result<Self, AmmError> {
        let fee_tier = config.fee_tier()?;
        Ok(Self {
            fee_tier,
            ratio_policy: config.ratio_policy,
            ledger,
            deriver,
            pools: HashMap::new(),
        })
    }

    /// The ledger collaborator.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger, e.g. to fund accounts.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Number of registered pools.
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Read-only view of the pool at `key`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolUninitialized`] if no pool exists for `key`.
    pub fn pool(&self, key: &PairKey) -> Result<&Pool, AmmError> {
        self.entry(key).map(|e| &e.pool)
    }

    /// Ledger accounts of the pool at `key`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolUninitialized`] if no pool exists for `key`.
    pub fn addresses(&self, key: &PairKey) -> Result<PoolAddresses, AmmError> {
        self.entry(key).map(|e| e.addresses)
    }

    /// Storage records of every pool, ordered by key.
    #[must_use]
    pub fn records(&self) -> Vec<PoolRecord> {
        let mut keys: Vec<&PairKey> = self.pools.keys().collect();
        keys.sort();
        keys.into_iter()
            .filter_map(|k| self.pools.get(k))
            .map(|e| e.pool.to_record())
            .collect()
    }

    /// Creates an empty pool for two distinct assets.  `asset_a` becomes
    /// side A.  Moves no tokens.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAssetPair`] if the ids are equal.
    /// - [`AmmError::PoolAlreadyExists`] if the pair is registered in
    ///   either order.
    #[instrument(skip_all, fields(a = %asset_a, b = %asset_b))]
    pub fn initialize(&mut self, asset_a: AssetId, asset_b: AssetId) -> Result<PairKey, AmmError> {
        let pair = AssetPair::new(asset_a, asset_b)
            .inspect_err(|e| warn!(error = %e, "initialize rejected"))?;
        let pool = Pool::new(pair, self.fee_tier);
        self.register(pool)
    }

    /// Registers a pool loaded from storage.
    ///
    /// # Errors
    ///
    /// - Any error from [`Pool::from_record`].
    /// - [`AmmError::PoolAlreadyExists`] if the pair is already registered.
    #[instrument(skip_all)]
    pub fn restore(&mut self, record: &PoolRecord) -> Result<PairKey, AmmError> {
        let pool =
            Pool::from_record(record).inspect_err(|e| warn!(error = %e, "restore rejected"))?;
        self.register(pool)
    }

    /// Deposits both assets and mints shares to `depositor`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolUninitialized`] if no pool exists for `key`.
    /// - [`AmmError::ZeroAmount`] if either amount, or the minted count, is
    ///   zero.
    /// - [`AmmError::InvalidRatio`] under [`RatioPolicy::Strict`] when the
    ///   amounts do not match the pool's ratio.
    /// - [`AmmError::ArithmeticOverflow`] if a reserve or the supply would
    ///   exceed `u64`.
    /// - [`AmmError::Ledger`] if the depositor cannot fund the transfer.
    #[instrument(skip_all, fields(pool = %key, %amount_a, %amount_b))]
    pub fn add_liquidity(
        &mut self,
        key: &PairKey,
        depositor: Address,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<DepositOutcome, AmmError> {
        self.try_add_liquidity(key, depositor, amount_a, amount_b)
            .inspect_err(|e| warn!(error = %e, "add_liquidity rejected"))
    }

    /// Burns `shares` from `holder` and pays out the pro-rata reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `shares` is zero.
    /// - [`AmmError::PoolUninitialized`] if the pool is missing or has no
    ///   shares outstanding.
    /// - [`AmmError::InsufficientShares`] if `shares` exceeds the supply or
    ///   the holder's balance.
    /// - [`AmmError::ZeroWithdrawal`] if either payout rounds to zero.
    /// - [`AmmError::Ledger`] for any other ledger failure.
    #[instrument(skip_all, fields(pool = %key, %shares))]
    pub fn remove_liquidity(
        &mut self,
        key: &PairKey,
        holder: Address,
        shares: Shares,
    ) -> Result<WithdrawalOutcome, AmmError> {
        self.try_remove_liquidity(key, holder, shares)
            .inspect_err(|e| warn!(error = %e, "remove_liquidity rejected"))
    }

    /// Prices a swap without changing anything.
    ///
    /// # Errors
    ///
    /// Same pricing errors as [`swap`](Self::swap).
    pub fn quote_swap(
        &self,
        key: &PairKey,
        side_in: Side,
        amount_in: Amount,
    ) -> Result<SwapQuote, AmmError> {
        let pool = self.pool(key)?;
        quote(pool, side_in, amount_in)
    }

    /// Sells `amount_in` of `side_in` for at least `min_amount_out` of the
    /// other side.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `amount_in` is zero or entirely fee.
    /// - [`AmmError::PoolUninitialized`] if the pool is missing or empty.
    /// - [`AmmError::InsufficientReserve`] if the output rounds to zero.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `min_amount_out`.
    /// - [`AmmError::ArithmeticOverflow`] if the inbound reserve would
    ///   exceed `u64`.
    /// - [`AmmError::Ledger`] if the trader cannot fund the transfer.
    #[instrument(skip_all, fields(pool = %key, side = ?side_in, %amount_in, %min_amount_out))]
    pub fn swap(
        &mut self,
        key: &PairKey,
        trader: Address,
        side_in: Side,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, AmmError> {
        self.try_swap(key, trader, side_in, amount_in, min_amount_out)
            .inspect_err(|e| warn!(error = %e, "swap rejected"))
    }

    // -- internals ----------------------------------------------------------

    fn entry(&self, key: &PairKey) -> Result<&PoolEntry, AmmError> {
        self.pools.get(key).ok_or(AmmError::PoolUninitialized)
    }

    fn register(&mut self, pool: Pool) -> Result<PairKey, AmmError> {
        let key = pool.pair().key();
        if self.pools.contains_key(&key) {
            warn!(pool = %key, "pool already exists");
            return Err(AmmError::PoolAlreadyExists);
        }
        let addresses = self.deriver.derive(pool.pair());
        info!(
            pool = %key,
            fee = %pool.fee_tier(),
            pool_account = %addresses.pool,
            "pool registered"
        );
        self.pools.insert(key, PoolEntry { pool, addresses });
        Ok(key)
    }

    /// Applies `delta`, then settles `batch`; restores the pool if the
    /// ledger refuses.
    fn commit(
        &mut self,
        key: &PairKey,
        delta: PoolDelta,
        batch: &[LedgerInstruction],
    ) -> Result<(), AmmError> {
        let entry = self.pools.get_mut(key).ok_or(AmmError::PoolUninitialized)?;
        let snapshot = entry.pool.clone();
        entry.pool.apply_delta(delta)?;
        if let Err(err) = self.ledger.execute(batch) {
            entry.pool = snapshot;
            debug!(error = %err, "ledger refused batch; pool restored");
            return Err(err.into());
        }
        Ok(())
    }

    fn try_add_liquidity(
        &mut self,
        key: &PairKey,
        depositor: Address,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<DepositOutcome, AmmError> {
        let entry = self.entry(key)?;
        let pool = &entry.pool;

        if self.ratio_policy == RatioPolicy::Strict && !pool.is_empty() {
            if amount_a.is_zero() || amount_b.is_zero() {
                return Err(AmmError::ZeroAmount);
            }
            check_deposit_ratio(pool.reserve_a(), pool.reserve_b(), amount_a, amount_b)?;
        }
        let minted = shares_for_deposit(
            pool.reserve_a(),
            pool.reserve_b(),
            pool.share_supply(),
            amount_a,
            amount_b,
        )?;
        debug!(%minted, "deposit sized");

        let addrs = entry.addresses;
        let batch = [
            LedgerInstruction::Transfer {
                asset: pool.asset_a(),
                from: depositor,
                to: addrs.vault_a,
                amount: amount_a,
            },
            LedgerInstruction::Transfer {
                asset: pool.asset_b(),
                from: depositor,
                to: addrs.vault_b,
                amount: amount_b,
            },
            LedgerInstruction::MintShares {
                share_mint: addrs.share_mint,
                to: depositor,
                amount: minted,
            },
        ];
        self.commit(key, PoolDelta::deposit(amount_a, amount_b, minted), &batch)?;

        info!(%minted, "liquidity added");
        Ok(DepositOutcome {
            amount_a,
            amount_b,
            minted,
        })
    }

    fn try_remove_liquidity(
        &mut self,
        key: &PairKey,
        holder: Address,
        shares: Shares,
    ) -> Result<WithdrawalOutcome, AmmError> {
        let entry = self.entry(key)?;
        let pool = &entry.pool;

        let (amount_a, amount_b) = amounts_for_shares(
            pool.reserve_a(),
            pool.reserve_b(),
            pool.share_supply(),
            shares,
        )?;
        debug!(%amount_a, %amount_b, "withdrawal sized");

        let addrs = entry.addresses;
        let batch = [
            LedgerInstruction::BurnShares {
                share_mint: addrs.share_mint,
                from: holder,
                amount: shares,
            },
            LedgerInstruction::Transfer {
                asset: pool.asset_a(),
                from: addrs.vault_a,
                to: holder,
                amount: amount_a,
            },
            LedgerInstruction::Transfer {
                asset: pool.asset_b(),
                from: addrs.vault_b,
                to: holder,
                amount: amount_b,
            },
        ];
        self.commit(key, PoolDelta::withdrawal(amount_a, amount_b, shares), &batch)
            .map_err(|e| match e {
                AmmError::Ledger(LedgerError::InsufficientShares { share_mint, .. })
                    if share_mint == addrs.share_mint =>
                {
                    AmmError::InsufficientShares
                }
                other => other,
            })?;

        info!(%amount_a, %amount_b, "liquidity removed");
        Ok(WithdrawalOutcome {
            amount_a,
            amount_b,
            burned: shares,
        })
    }

    fn try_swap(
        &mut self,
        key: &PairKey,
        trader: Address,
        side_in: Side,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, AmmError> {
        let entry = self.entry(key)?;
        let pool = &entry.pool;

        let q = quote(pool, side_in, amount_in)?;
        debug!(amount_out = %q.amount_out, fee = %q.fee, "swap priced");
        if q.amount_out < min_amount_out {
            return Err(AmmError::SlippageExceeded {
                expected_min: min_amount_out.get(),
                actual: q.amount_out.get(),
            });
        }

        let side_out = side_in.opposite();
        let addrs = entry.addresses;
        let (vault_in, vault_out) = match side_in {
            Side::A => (addrs.vault_a, addrs.vault_b),
            Side::B => (addrs.vault_b, addrs.vault_a),
        };
        let batch = [
            LedgerInstruction::Transfer {
                asset: pool.pair().asset(side_in),
                from: trader,
                to: vault_in,
                amount: amount_in,
            },
            LedgerInstruction::Transfer {
                asset: pool.pair().asset(side_out),
                from: vault_out,
                to: trader,
                amount: q.amount_out,
            },
        ];
        self.commit(key, PoolDelta::swap(side_in, amount_in, q.amount_out), &batch)?;

        info!(amount_out = %q.amount_out, "swap executed");
        Ok(SwapOutcome {
            side_in,
            amount_in,
            amount_out: q.amount_out,
            fee: q.fee,
        })
    }
}

fn quote(pool: &Pool, side_in: Side, amount_in: Amount) -> Result<SwapQuote, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::ZeroAmount);
    }
    if pool.is_empty() {
        return Err(AmmError::PoolUninitialized);
    }
    swap_output(
        pool.reserve(side_in),
        pool.reserve(side_in.opposite()),
        amount_in,
        pool.fee_tier(),
    )
}

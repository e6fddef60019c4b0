//! Persisted state of one pool and its single mutation path.

use crate::domain::{Amount, AssetId, AssetPair, FeeTier, Shares, Side};
use crate::error::AmmError;
use crate::math::product;

/// What kind of operation produced a [`PoolDelta`].
///
/// Only swaps are held to the non-decreasing product rule; deposits and
/// withdrawals scale the product with the share supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    /// Reserve exchange at the curve price.
    Swap,
    /// Deposit or withdrawal that also mints or burns shares.
    Liquidity,
}

/// Signed changes to a pool's three quantities, applied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolDelta {
    /// Change to `reserve_a`.
    pub delta_a: i128,
    /// Change to `reserve_b`.
    pub delta_b: i128,
    /// Change to `share_supply`.
    pub delta_shares: i128,
    /// Which invariant guard applies.
    pub kind: DeltaKind,
}

impl PoolDelta {
    /// Swap selling `amount_in` on `side_in` for `amount_out` of the other side.
    #[must_use]
    pub fn swap(side_in: Side, amount_in: Amount, amount_out: Amount) -> Self {
        let inflow = i128::from(amount_in.get());
        let outflow = -i128::from(amount_out.get());
        let (delta_a, delta_b) = match side_in {
            Side::A => (inflow, outflow),
            Side::B => (outflow, inflow),
        };
        Self {
            delta_a,
            delta_b,
            delta_shares: 0,
            kind: DeltaKind::Swap,
        }
    }

    /// Deposit of both assets minting `minted` shares.
    #[must_use]
    pub fn deposit(amount_a: Amount, amount_b: Amount, minted: Shares) -> Self {
        Self {
            delta_a: i128::from(amount_a.get()),
            delta_b: i128::from(amount_b.get()),
            delta_shares: i128::from(minted.get()),
            kind: DeltaKind::Liquidity,
        }
    }

    /// Withdrawal of both assets burning `burned` shares.
    #[must_use]
    pub fn withdrawal(amount_a: Amount, amount_b: Amount, burned: Shares) -> Self {
        Self {
            delta_a: -i128::from(amount_a.get()),
            delta_b: -i128::from(amount_b.get()),
            delta_shares: -i128::from(burned.get()),
            kind: DeltaKind::Liquidity,
        }
    }
}

/// Exact spot price of one side in units of the other.
///
/// Kept as a ratio of reserves so no precision is lost; convert with
/// [`to_f64`](Self::to_f64) only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotPrice {
    /// Reserve of the asset being bought.
    pub numerator: Amount,
    /// Reserve of the asset being sold.
    pub denominator: Amount,
}

impl SpotPrice {
    /// Lossy floating-point view.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.numerator.get() as f64 / self.denominator.get() as f64
    }
}

/// One two-asset constant-product pool.
///
/// Fields are private and change only through [`apply_delta`](Self::apply_delta),
/// which moves both reserves and the share supply together or not at all.
///
/// A pool is *empty* while `share_supply` is zero: right after
/// initialization, or after every share has been burned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pair: AssetPair,
    reserve_a: Amount,
    reserve_b: Amount,
    share_supply: Shares,
    fee_tier: FeeTier,
}

impl Pool {
    /// A fresh pool with no reserves and no shares.
    #[must_use]
    pub const fn new(pair: AssetPair, fee_tier: FeeTier) -> Self {
        Self {
            pair,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            share_supply: Shares::ZERO,
            fee_tier,
        }
    }

    /// Rebuilds a pool from stored quantities.  Used by record decoding.
    pub(crate) const fn from_parts(
        pair: AssetPair,
        reserve_a: Amount,
        reserve_b: Amount,
        share_supply: Shares,
        fee_tier: FeeTier,
    ) -> Self {
        Self {
            pair,
            reserve_a,
            reserve_b,
            share_supply,
            fee_tier,
        }
    }

    /// The pool's assets in bookkeeping order.
    #[must_use]
    pub const fn pair(&self) -> &AssetPair {
        &self.pair
    }

    /// Side A's asset.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.pair.asset_a()
    }

    /// Side B's asset.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.pair.asset_b()
    }

    /// Reserve of side A.
    #[must_use]
    pub const fn reserve_a(&self) -> Amount {
        self.reserve_a
    }

    /// Reserve of side B.
    #[must_use]
    pub const fn reserve_b(&self) -> Amount {
        self.reserve_b
    }

    /// Reserve held on `side`.
    #[must_use]
    pub const fn reserve(&self, side: Side) -> Amount {
        match side {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        }
    }

    /// Outstanding liquidity shares.
    #[must_use]
    pub const fn share_supply(&self) -> Shares {
        self.share_supply
    }

    /// Swap fee fixed at creation.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// `true` while no shares are outstanding.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.share_supply.is_zero()
    }

    /// The constant product `reserve_a * reserve_b`.
    #[must_use]
    pub const fn invariant(&self) -> u128 {
        product(self.reserve_a.get(), self.reserve_b.get())
    }

    /// Marginal price of selling `side`: units of the opposite asset per
    /// unit of `side`, before fees.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolUninitialized`] if the sold side's reserve is zero.
    pub fn spot_price(&self, side: Side) -> Result<SpotPrice, AmmError> {
        let denominator = self.reserve(side);
        if denominator.is_zero() {
            return Err(AmmError::PoolUninitialized);
        }
        Ok(SpotPrice {
            numerator: self.reserve(side.opposite()),
            denominator,
        })
    }

    /// Applies `delta` to both reserves and the share supply atomically.
    ///
    /// Every new value is computed and checked before anything is written,
    /// so on error the pool is untouched.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NegativeReserve`] if any quantity would go below zero.
    /// - [`AmmError::ArithmeticOverflow`] if any quantity would exceed `u64::MAX`.
    /// - [`AmmError::InvariantViolated`] if a [`DeltaKind::Swap`] would lower
    ///   the product.
    pub fn apply_delta(&mut self, delta: PoolDelta) -> Result<(), AmmError> {
        let reserve_a = shift(self.reserve_a.get(), delta.delta_a, "reserve_a")?;
        let reserve_b = shift(self.reserve_b.get(), delta.delta_b, "reserve_b")?;
        let share_supply = shift(self.share_supply.get(), delta.delta_shares, "share_supply")?;

        if delta.kind == DeltaKind::Swap && product(reserve_a, reserve_b) < self.invariant() {
            return Err(AmmError::InvariantViolated);
        }

        self.reserve_a = Amount::new(reserve_a);
        self.reserve_b = Amount::new(reserve_b);
        self.share_supply = Shares::new(share_supply);
        Ok(())
    }
}

fn shift(current: u64, delta: i128, context: &'static str) -> Result<u64, AmmError> {
    let next = i128::from(current)
        .checked_add(delta)
        .ok_or(AmmError::ArithmeticOverflow(context))?;
    if next < 0 {
        return Err(AmmError::NegativeReserve);
    }
    u64::try_from(next).map_err(|_| AmmError::ArithmeticOverflow(context))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn pair() -> AssetPair {
        let Ok(p) = AssetPair::new(AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]))
        else {
            panic!("distinct assets");
        };
        p
    }

    fn seeded(a: u64, b: u64, s: u64) -> Pool {
        Pool::from_parts(pair(), Amount::new(a), Amount::new(b), Shares::new(s), FeeTier::DEFAULT)
    }

    // -- construction -------------------------------------------------------

    #[test]
    fn new_pool_is_empty() {
        let pool = Pool::new(pair(), FeeTier::DEFAULT);
        assert!(pool.is_empty());
        assert_eq!(pool.invariant(), 0);
        assert_eq!(pool.reserve(Side::A), Amount::ZERO);
    }

    // -- apply_delta: liquidity ---------------------------------------------

    #[test]
    fn deposit_updates_all_three() {
        let mut pool = Pool::new(pair(), FeeTier::DEFAULT);
        let d = PoolDelta::deposit(Amount::new(100), Amount::new(400), Shares::new(200));
        let Ok(()) = pool.apply_delta(d) else {
            panic!("expected Ok");
        };
        assert_eq!(pool.reserve_a(), Amount::new(100));
        assert_eq!(pool.reserve_b(), Amount::new(400));
        assert_eq!(pool.share_supply(), Shares::new(200));
        assert!(!pool.is_empty());
    }

    #[test]
    fn withdrawal_may_lower_product() {
        let mut pool = seeded(100, 100, 100);
        let d = PoolDelta::withdrawal(Amount::new(50), Amount::new(50), Shares::new(50));
        assert_eq!(pool.apply_delta(d), Ok(()));
        assert_eq!(pool.invariant(), 2_500);
    }

    #[test]
    fn negative_reserve_leaves_pool_untouched() {
        let mut pool = seeded(100, 100, 100);
        let before = pool.clone();
        let d = PoolDelta::withdrawal(Amount::new(10), Amount::new(101), Shares::new(10));
        assert_eq!(pool.apply_delta(d), Err(AmmError::NegativeReserve));
        assert_eq!(pool, before);
    }

    #[test]
    fn negative_supply_rejected() {
        let mut pool = seeded(100, 100, 5);
        let d = PoolDelta::withdrawal(Amount::new(1), Amount::new(1), Shares::new(6));
        assert_eq!(pool.apply_delta(d), Err(AmmError::NegativeReserve));
    }

    #[test]
    fn overflow_names_quantity() {
        let mut pool = seeded(u64::MAX, 1, 1);
        let d = PoolDelta::deposit(Amount::new(1), Amount::new(1), Shares::new(1));
        assert_eq!(
            pool.apply_delta(d),
            Err(AmmError::ArithmeticOverflow("reserve_a"))
        );
        assert_eq!(pool.reserve_b(), Amount::new(1));
    }

    // -- apply_delta: swap --------------------------------------------------

    #[test]
    fn swap_keeping_product_accepted() {
        let mut pool = seeded(150_000_000, 150_000_000, 150_000_000);
        let d = PoolDelta::swap(Side::A, Amount::new(30_000_000), Amount::new(24_979_163));
        assert_eq!(pool.apply_delta(d), Ok(()));
        assert_eq!(pool.reserve_a(), Amount::new(180_000_000));
        assert_eq!(pool.reserve_b(), Amount::new(125_020_837));
        assert_eq!(pool.share_supply(), Shares::new(150_000_000));
    }

    #[test]
    fn swap_lowering_product_rejected() {
        let mut pool = seeded(1_000, 1_000, 1_000);
        let before = pool.clone();
        // 1_100 * 900 = 990_000 < 1_000_000
        let d = PoolDelta::swap(Side::B, Amount::new(100), Amount::new(100));
        assert_eq!(pool.apply_delta(d), Err(AmmError::InvariantViolated));
        assert_eq!(pool, before);
    }

    #[test]
    fn swap_side_b_direction() {
        let d = PoolDelta::swap(Side::B, Amount::new(7), Amount::new(3));
        assert_eq!((d.delta_a, d.delta_b, d.delta_shares), (-3, 7, 0));
        assert_eq!(d.kind, DeltaKind::Swap);
    }

    // -- queries ------------------------------------------------------------

    #[test]
    fn spot_price_ratio() {
        let pool = seeded(180_000_000, 125_020_837, 150_000_000);
        let Ok(p) = pool.spot_price(Side::A) else {
            panic!("expected Ok");
        };
        assert_eq!(p.numerator, Amount::new(125_020_837));
        assert_eq!(p.denominator, Amount::new(180_000_000));
        assert!(p.to_f64() < 1.0);
    }

    #[test]
    fn spot_price_on_empty_pool() {
        let pool = Pool::new(pair(), FeeTier::DEFAULT);
        assert_eq!(pool.spot_price(Side::B), Err(AmmError::PoolUninitialized));
    }
}

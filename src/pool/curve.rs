//! Pure constant-product pricing and share accounting.
//!
//! Nothing here touches pool state: each function takes the current
//! reserves and supply by value and returns the quantities an operation
//! would move.  The engine feeds the results into
//! [`Pool::apply_delta`](super::Pool::apply_delta).
//!
//! # Swap (sell `amount_in` of side X for side Y)
//!
//! 1. `in_after_fee = floor(amount_in * (10_000 - fee_bps) / 10_000)`
//! 2. `new_reserve_in = reserve_in + in_after_fee`
//! 3. `kept_out = ceil(reserve_in * reserve_out / new_reserve_in)`
//! 4. `amount_out = reserve_out - kept_out`
//!
//! Step 3 rounds the reserve the pool keeps *up*, which is the same as
//! rounding the trader's output down: `amount_out` equals
//! `floor(reserve_out * in_after_fee / new_reserve_in)`.  The full
//! `amount_in`, fee included, is what lands in the pool.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, FeeTier, Shares};
use crate::error::AmmError;
use crate::math::{div_round, isqrt, mul_div, narrow, product, CheckedArithmetic, Rounding};

/// Priced outcome of a prospective swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Gross input the trader pays.
    pub amount_in: Amount,
    /// Output the trader receives.
    pub amount_out: Amount,
    /// Part of `amount_in` withheld from pricing (`amount_in - in_after_fee`).
    pub fee: Amount,
}

/// Prices a swap against `(reserve_in, reserve_out)`.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `amount_in` is zero or nothing is left
///   after the fee.
/// - [`AmmError::PoolUninitialized`] if either reserve is zero.
/// - [`AmmError::InsufficientReserve`] if the output rounds to zero or
///   would drain `reserve_out`.
/// - [`AmmError::ArithmeticOverflow`] if an intermediate leaves range.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, FeeTier};
/// use pair_amm::pool::swap_output;
///
/// let q = swap_output(
///     Amount::new(150_000_000),
///     Amount::new(150_000_000),
///     Amount::new(30_000_000),
///     FeeTier::DEFAULT,
/// )
/// .expect("priced");
/// assert_eq!(q.amount_out.get(), 24_979_163);
/// assert_eq!(q.fee.get(), 30_000);
/// ```
pub fn swap_output(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
    fee_tier: FeeTier,
) -> Result<SwapQuote, AmmError> {
    if amount_in.is_zero() {
        return Err(AmmError::ZeroAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::PoolUninitialized);
    }

    let in_after_fee = fee_tier.amount_after_fee(amount_in)?;
    if in_after_fee.is_zero() {
        return Err(AmmError::ZeroAmount);
    }

    // overflow here fails the swap before any output is priced
    let new_reserve_in = reserve_in.safe_add(&in_after_fee, "reserve_in")?;
    let kept_out = div_round(
        product(reserve_in.get(), reserve_out.get()),
        new_reserve_in.widen(),
        Rounding::Up,
    )
    .ok_or(AmmError::DivisionByZero)?;
    let kept_out = Amount::new(narrow(kept_out, "kept reserve")?);

    let amount_out = reserve_out.safe_sub(&kept_out)?;
    if amount_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InsufficientReserve);
    }

    let fee = amount_in.safe_sub(&in_after_fee)?;

    Ok(SwapQuote {
        amount_in,
        amount_out,
        fee,
    })
}

/// Shares minted for depositing `(amount_a, amount_b)`.
///
/// With no shares outstanding the deposit sets the scale:
/// `floor(sqrt(amount_a * amount_b))`.  Burning the whole supply pays out
/// the reserves exactly, so such a pool normally holds nothing; reserves
/// restored under a zero supply go to this depositor.  Otherwise shares
/// follow the
/// scarcer side: `min(amount_a * S / reserve_a, amount_b * S / reserve_b)`,
/// both floored.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if either amount, or the minted count, is zero.
/// - [`AmmError::DivisionByZero`] if shares exist but a reserve is empty.
/// - [`AmmError::ArithmeticOverflow`] if the minted count exceeds `u64`.
pub fn shares_for_deposit(
    reserve_a: Amount,
    reserve_b: Amount,
    supply: Shares,
    amount_a: Amount,
    amount_b: Amount,
) -> Result<Shares, AmmError> {
    if amount_a.is_zero() || amount_b.is_zero() {
        return Err(AmmError::ZeroAmount);
    }

    let minted = if supply.is_zero() {
        isqrt(product(amount_a.get(), amount_b.get()))
    } else {
        let by_a = div_round(
            product(amount_a.get(), supply.get()),
            reserve_a.widen(),
            Rounding::Down,
        )
        .ok_or(AmmError::DivisionByZero)?;
        let by_b = div_round(
            product(amount_b.get(), supply.get()),
            reserve_b.widen(),
            Rounding::Down,
        )
        .ok_or(AmmError::DivisionByZero)?;
        narrow(by_a.min(by_b), "minted shares")?
    };

    if minted == 0 {
        return Err(AmmError::ZeroAmount);
    }
    Ok(Shares::new(minted))
}

/// Checks that a deposit matches the current price exactly:
/// `floor(amount_a * reserve_b / reserve_a) == amount_b`.
///
/// # Errors
///
/// - [`AmmError::InvalidRatio`] on mismatch.
/// - [`AmmError::DivisionByZero`] if `reserve_a` is zero.
/// - [`AmmError::ArithmeticOverflow`] if the implied `amount_b` exceeds `u64`.
pub fn check_deposit_ratio(
    reserve_a: Amount,
    reserve_b: Amount,
    amount_a: Amount,
    amount_b: Amount,
) -> Result<(), AmmError> {
    let implied_b = mul_div(
        amount_a.get(),
        reserve_b.get(),
        reserve_a.get(),
        Rounding::Down,
        "implied deposit",
    )?;
    if implied_b != amount_b.get() {
        return Err(AmmError::InvalidRatio);
    }
    Ok(())
}

/// Reserve amounts redeemed by burning `shares` out of `supply`:
/// `floor(reserve * shares / supply)` on each side.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `shares` is zero.
/// - [`AmmError::PoolUninitialized`] if `supply` is zero.
/// - [`AmmError::InsufficientShares`] if `shares > supply`.
/// - [`AmmError::ZeroWithdrawal`] if either side would pay out nothing.
pub fn amounts_for_shares(
    reserve_a: Amount,
    reserve_b: Amount,
    supply: Shares,
    shares: Shares,
) -> Result<(Amount, Amount), AmmError> {
    if shares.is_zero() {
        return Err(AmmError::ZeroAmount);
    }
    if supply.is_zero() {
        return Err(AmmError::PoolUninitialized);
    }
    if shares > supply {
        return Err(AmmError::InsufficientShares);
    }

    // shares <= supply, so neither quotient exceeds its reserve
    let amount_a = mul_div(
        reserve_a.get(),
        shares.get(),
        supply.get(),
        Rounding::Down,
        "withdraw a",
    )?;
    let amount_b = mul_div(
        reserve_b.get(),
        shares.get(),
        supply.get(),
        Rounding::Down,
        "withdraw b",
    )?;
    if amount_a == 0 || amount_b == 0 {
        return Err(AmmError::ZeroWithdrawal);
    }
    Ok((Amount::new(amount_a), Amount::new(amount_b)))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;

    fn amt(v: u64) -> Amount {
        Amount::new(v)
    }

    // -- swap_output --------------------------------------------------------

    #[test]
    fn swap_matches_reference_trade() {
        let Ok(q) = swap_output(amt(150_000_000), amt(150_000_000), amt(30_000_000), FeeTier::DEFAULT)
        else {
            panic!("expected Ok");
        };
        assert_eq!(q.amount_in, amt(30_000_000));
        assert_eq!(q.amount_out, amt(24_979_163));
        assert_eq!(q.fee, amt(30_000));
    }

    #[test]
    fn swap_output_equals_floor_form() {
        // floor(reserve_out * net / (reserve_in + net)) for a spread of inputs
        let (ri, ro) = (7_777_777u64, 3_333_333u64);
        for amount_in in [1_001u64, 55_555, 1_000_000, 123_456_789] {
            let Ok(q) = swap_output(amt(ri), amt(ro), amt(amount_in), FeeTier::DEFAULT) else {
                panic!("expected Ok for {amount_in}");
            };
            let net = u128::from(amount_in) * 9_990 / 10_000;
            let expected = u128::from(ro) * net / (u128::from(ri) + net);
            assert_eq!(u128::from(q.amount_out.get()), expected);
        }
    }

    #[test]
    fn swap_zero_input() {
        assert_eq!(
            swap_output(amt(10), amt(10), Amount::ZERO, FeeTier::DEFAULT),
            Err(AmmError::ZeroAmount)
        );
    }

    #[test]
    fn swap_input_eaten_by_fee_floor() {
        // 1 * 9_990 / 10_000 floors to 0
        assert_eq!(
            swap_output(amt(1_000), amt(1_000), amt(1), FeeTier::DEFAULT),
            Err(AmmError::ZeroAmount)
        );
    }

    #[test]
    fn swap_against_empty_reserve() {
        assert_eq!(
            swap_output(Amount::ZERO, amt(1_000), amt(100), FeeTier::DEFAULT),
            Err(AmmError::PoolUninitialized)
        );
    }

    #[test]
    fn swap_output_rounds_to_nothing() {
        // tiny input into a deep pool on the far side
        assert_eq!(
            swap_output(amt(1_000_000_000), amt(10), amt(10_000), FeeTier::DEFAULT),
            Err(AmmError::InsufficientReserve)
        );
    }

    #[test]
    fn zero_fee_has_no_fee_component() {
        let Ok(tier) = FeeTier::new(BasisPoints::ZERO) else {
            panic!("expected Ok");
        };
        let Ok(q) = swap_output(amt(1_000), amt(1_000), amt(1_000), tier) else {
            panic!("expected Ok");
        };
        assert_eq!(q.fee, Amount::ZERO);
        // 1000 * 1000 / 2000 = 500
        assert_eq!(q.amount_out, amt(500));
    }

    #[test]
    fn swap_near_u64_limit() {
        let half = u64::MAX / 2;
        let Ok(q) = swap_output(amt(half), amt(half), amt(half / 2), FeeTier::DEFAULT) else {
            panic!("expected Ok");
        };
        assert!(q.amount_out < amt(half));
        assert!(q.amount_out > Amount::ZERO);
    }

    #[test]
    fn swap_inbound_reserve_overflow() {
        assert_eq!(
            swap_output(Amount::MAX, amt(1_000), amt(10_000), FeeTier::DEFAULT),
            Err(AmmError::ArithmeticOverflow("reserve_in"))
        );
    }

    // -- shares_for_deposit -------------------------------------------------

    #[test]
    fn first_deposit_geometric_mean() {
        let Ok(s) = shares_for_deposit(
            Amount::ZERO,
            Amount::ZERO,
            Shares::ZERO,
            amt(100_000_000),
            amt(100_000_000),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(s, Shares::new(100_000_000));
    }

    #[test]
    fn first_deposit_lopsided() {
        // sqrt(4 * 9) = 6
        let Ok(s) = shares_for_deposit(Amount::ZERO, Amount::ZERO, Shares::ZERO, amt(4), amt(9)) else {
            panic!("expected Ok");
        };
        assert_eq!(s, Shares::new(6));
    }

    #[test]
    fn proportional_deposit() {
        let Ok(s) = shares_for_deposit(
            amt(100_000_000),
            amt(100_000_000),
            Shares::new(100_000_000),
            amt(50_000_000),
            amt(50_000_000),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(s, Shares::new(50_000_000));
    }

    #[test]
    fn mismatched_deposit_follows_scarcer_side() {
        let Ok(s) = shares_for_deposit(amt(1_000), amt(2_000), Shares::new(1_000), amt(100), amt(50)) else {
            panic!("expected Ok");
        };
        // min(100 * 1000 / 1000, 50 * 1000 / 2000) = min(100, 25)
        assert_eq!(s, Shares::new(25));
    }

    #[test]
    fn dust_deposit_mints_nothing() {
        assert_eq!(
            shares_for_deposit(amt(1_000_000), amt(1_000_000), Shares::new(10), amt(1), amt(1)),
            Err(AmmError::ZeroAmount)
        );
    }

    #[test]
    fn zero_side_rejected() {
        assert_eq!(
            shares_for_deposit(Amount::ZERO, Amount::ZERO, Shares::ZERO, amt(5), Amount::ZERO),
            Err(AmmError::ZeroAmount)
        );
    }

    #[test]
    fn minted_overflow_reported() {
        let r = shares_for_deposit(amt(1), amt(1), Shares::new(u64::MAX), Amount::MAX, Amount::MAX);
        assert_eq!(r, Err(AmmError::ArithmeticOverflow("minted shares")));
    }

    // -- check_deposit_ratio ------------------------------------------------

    #[test]
    fn exact_ratio_accepted() {
        assert_eq!(check_deposit_ratio(amt(1_000), amt(2_000), amt(10), amt(20)), Ok(()));
    }

    #[test]
    fn off_ratio_rejected() {
        assert_eq!(
            check_deposit_ratio(amt(1_000), amt(2_000), amt(10), amt(21)),
            Err(AmmError::InvalidRatio)
        );
    }

    // -- amounts_for_shares -------------------------------------------------

    #[test]
    fn redeem_third_of_supply() {
        let Ok((a, b)) =
            amounts_for_shares(amt(180_000_000), amt(125_020_837), Shares::new(150_000_000), Shares::new(50_000_000))
        else {
            panic!("expected Ok");
        };
        assert_eq!(a, amt(60_000_000));
        assert_eq!(b, amt(41_673_612));
    }

    #[test]
    fn redeem_everything() {
        let Ok((a, b)) = amounts_for_shares(amt(7), amt(11), Shares::new(3), Shares::new(3)) else {
            panic!("expected Ok");
        };
        assert_eq!((a, b), (amt(7), amt(11)));
    }

    #[test]
    fn redeem_more_than_supply() {
        assert_eq!(
            amounts_for_shares(amt(7), amt(11), Shares::new(3), Shares::new(4)),
            Err(AmmError::InsufficientShares)
        );
    }

    #[test]
    fn redeem_from_empty_pool() {
        assert_eq!(
            amounts_for_shares(Amount::ZERO, Amount::ZERO, Shares::ZERO, Shares::new(1)),
            Err(AmmError::PoolUninitialized)
        );
    }

    #[test]
    fn redeem_dust_refused() {
        // 1 * 10 / 1000 = 0 on side A
        assert_eq!(
            amounts_for_shares(amt(1), amt(1_000_000), Shares::new(1_000), Shares::new(10)),
            Err(AmmError::ZeroWithdrawal)
        );
    }

    #[test]
    fn redeem_zero_shares() {
        assert_eq!(
            amounts_for_shares(amt(7), amt(11), Shares::new(3), Shares::ZERO),
            Err(AmmError::ZeroAmount)
        );
    }
}

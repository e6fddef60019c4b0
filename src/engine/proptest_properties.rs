//! Property tests over random pools and trades.
//!
//! 1. **Product non-decrease**: a committed swap never lowers
//!    `reserve_a * reserve_b`.
//! 2. **Deposit round-trip**: depositing at the pool ratio and burning the
//!    minted shares returns no more than was put in, and the shortfall is
//!    bounded by a few units of rounding.
//! 3. **Output monotonicity**: a larger input never quotes a smaller output.
//! 4. **Slippage guard**: demanding one unit more than the quote fails and
//!    changes nothing.
//! 5. **Swap round-trip**: selling the proceeds back never returns more
//!    than the original input.
//!
//! Strategies are sized so every generated operation is accepted; a
//! rejection fails the case instead of skipping it.  Properties 1 and 2
//! also run against reserves between `u64::MAX / 4` and `u64::MAX / 2`,
//! where every product needs the full 128-bit width.

#![allow(clippy::panic)]

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use super::PoolEngine;
use crate::addressing::SeededAddressDeriver;
use crate::config::EngineConfig;
use crate::domain::{Address, Amount, AssetId, PairKey, Shares, Side};
use crate::error::AmmError;
use crate::ledger::InMemoryLedger;

type Engine = PoolEngine<InMemoryLedger, SeededAddressDeriver>;

const X: AssetId = AssetId::from_bytes([1u8; 32]);
const Y: AssetId = AssetId::from_bytes([2u8; 32]);
const LP: Address = Address::from_bytes([10u8; 32]);
const USER: Address = Address::from_bytes([11u8; 32]);

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn seeded(ra: u64, rb: u64, fee_bps: u16) -> (Engine, PairKey) {
    let config = EngineConfig {
        fee_bps,
        ..EngineConfig::default()
    };
    let Ok(mut engine) =
        PoolEngine::new(config, InMemoryLedger::new(), SeededAddressDeriver::default())
    else {
        panic!("valid config");
    };
    for who in [LP, USER] {
        for asset in [X, Y] {
            let Ok(()) = engine.ledger_mut().credit(who, asset, Amount::new(u64::MAX / 2)) else {
                panic!("funding");
            };
        }
    }
    let Ok(key) = engine.initialize(X, Y) else {
        panic!("initialize");
    };
    let Ok(_) = engine.add_liquidity(&key, LP, Amount::new(ra), Amount::new(rb)) else {
        panic!("seed deposit");
    };
    (engine, key)
}

fn reserves(engine: &Engine, key: &PairKey) -> (u64, u64, u64) {
    let Ok(pool) = engine.pool(key) else {
        panic!("registered");
    };
    (
        pool.reserve_a().get(),
        pool.reserve_b().get(),
        pool.share_supply().get(),
    )
}

fn accepted<T, E: core::fmt::Debug>(
    result: Result<T, E>,
    what: &str,
) -> Result<T, TestCaseError> {
    result.map_err(|e| TestCaseError::fail(format!("{what} rejected: {e:?}")))
}

/// Deposits `a` and the matching `b` at the pool ratio, burns the minted
/// shares and checks the shortfall on each side.
fn check_deposit_round_trip(ra: u64, rb: u64, a: u64) -> Result<(), TestCaseError> {
    let (mut engine, key) = seeded(ra, rb, 10);
    let (_, _, supply) = reserves(&engine, &key);
    let wide_b = u128::from(a) * u128::from(rb) / u128::from(ra);
    let b = accepted(u64::try_from(wide_b), "implied b")?;
    prop_assert!(b > 0);

    let dep = accepted(
        engine.add_liquidity(&key, USER, Amount::new(a), Amount::new(b)),
        "deposit",
    )?;
    let out = accepted(engine.remove_liquidity(&key, USER, dep.minted), "withdrawal")?;
    let (ao, bo) = (out.amount_a.get(), out.amount_b.get());
    prop_assert!(ao <= a, "got back more A: {} > {}", ao, a);
    prop_assert!(bo <= b, "got back more B: {} > {}", bo, b);

    let slack_a = ra.div_ceil(rb) + ra.div_ceil(supply) + 2;
    let slack_b = rb.div_ceil(supply) + 2;
    prop_assert!(a - ao <= slack_a, "A shortfall {} > {}", a - ao, slack_a);
    prop_assert!(b - bo <= slack_b, "B shortfall {} > {}", b - bo, slack_b);
    Ok(())
}

/// Swaps `amount` and checks the product did not fall.
fn check_swap_product(
    ra: u64,
    rb: u64,
    fee: u16,
    side: Side,
    amount: u64,
) -> Result<(), TestCaseError> {
    let (mut engine, key) = seeded(ra, rb, fee);
    let before = u128::from(ra) * u128::from(rb);

    accepted(
        engine.swap(&key, USER, side, Amount::new(amount), Amount::ZERO),
        "swap",
    )?;
    let (a1, b1, _) = reserves(&engine, &key);
    prop_assert!(
        u128::from(a1) * u128::from(b1) >= before,
        "product fell: {} * {} < {}", a1, b1, before
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in [10_000, 10_000_000].
fn reserve_strategy() -> impl Strategy<Value = u64> {
    10_000u64..=10_000_000u64
}

/// Reserves where `reserve_a * reserve_b` exceeds `2^124`.
fn wide_reserve_strategy() -> impl Strategy<Value = u64> {
    (u64::MAX / 4)..=(u64::MAX / 2)
}

/// Non-zero fee up to 1%.
fn fee_strategy() -> impl Strategy<Value = u16> {
    1u16..=100u16
}

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::A), Just(Side::B)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // -----------------------------------------------------------------------
    // Property 1: Product non-decrease
    // -----------------------------------------------------------------------

    #[test]
    fn prop_swap_never_lowers_product(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
        side in side_strategy(),
        amount in 2_000u64..=50_000_000u64,
    ) {
        check_swap_product(ra, rb, fee, side, amount)?;
    }

    #[test]
    fn prop_swap_never_lowers_product_wide(
        ra in wide_reserve_strategy(),
        rb in wide_reserve_strategy(),
        fee in fee_strategy(),
        side in side_strategy(),
        amount in 1_000u64..=(u64::MAX / 4),
    ) {
        check_swap_product(ra, rb, fee, side, amount)?;
    }

    // -----------------------------------------------------------------------
    // Property 2: Deposit round-trip
    // -----------------------------------------------------------------------

    #[test]
    fn prop_deposit_round_trip_loses_only_rounding(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        a in 100_000u64..=10_000_000u64,
    ) {
        check_deposit_round_trip(ra, rb, a)?;
    }

    #[test]
    fn prop_deposit_round_trip_loses_only_rounding_wide(
        ra in wide_reserve_strategy(),
        rb in wide_reserve_strategy(),
        a in (u64::MAX / 16)..=(u64::MAX / 8),
    ) {
        check_deposit_round_trip(ra, rb, a)?;
    }

    // -----------------------------------------------------------------------
    // Property 3: Output monotonicity
    // -----------------------------------------------------------------------

    #[test]
    fn prop_larger_input_never_pays_less(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        side in side_strategy(),
        small in 2_000u64..=5_000_000u64,
        extra in 1u64..=5_000_000u64,
    ) {
        let (engine, key) = seeded(ra, rb, 10);
        let q_small = accepted(engine.quote_swap(&key, side, Amount::new(small)), "quote")?;
        let q_large = accepted(
            engine.quote_swap(&key, side, Amount::new(small + extra)),
            "larger quote",
        )?;
        prop_assert!(q_large.amount_out >= q_small.amount_out);
    }

    // -----------------------------------------------------------------------
    // Property 4: Slippage guard
    // -----------------------------------------------------------------------

    #[test]
    fn prop_min_out_above_quote_rejected(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        side in side_strategy(),
        amount in 2_000u64..=5_000_000u64,
    ) {
        let (mut engine, key) = seeded(ra, rb, 10);
        let q = accepted(engine.quote_swap(&key, side, Amount::new(amount)), "quote")?;
        let before = reserves(&engine, &key);
        let ledger_before = engine.ledger().clone();
        let demanded = q.amount_out.get() + 1;

        let result = engine.swap(&key, USER, side, Amount::new(amount), Amount::new(demanded));
        prop_assert_eq!(
            result,
            Err(AmmError::SlippageExceeded { expected_min: demanded, actual: q.amount_out.get() })
        );
        prop_assert_eq!(reserves(&engine, &key), before);
        prop_assert_eq!(engine.ledger(), &ledger_before);
    }

    // -----------------------------------------------------------------------
    // Property 5: Swap round-trip
    // -----------------------------------------------------------------------

    #[test]
    fn prop_swap_round_trip_loses_value(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        fee in fee_strategy(),
    ) {
        let swap_in = ra / 100;
        let (mut engine, key) = seeded(ra, rb, fee);

        let first = accepted(
            engine.swap(&key, USER, Side::A, Amount::new(swap_in), Amount::ZERO),
            "first leg",
        )?;
        let back = accepted(
            engine.swap(&key, USER, Side::B, first.amount_out, Amount::ZERO),
            "return leg",
        )?;
        prop_assert!(
            back.amount_out.get() <= swap_in,
            "round-trip gained: {} > {}", back.amount_out.get(), swap_in
        );
    }
}

#[test]
fn seeded_helper_mints_geometric_mean() {
    let (engine, key) = seeded(4_000_000, 9_000_000, 10);
    let Ok(pool) = engine.pool(&key) else {
        panic!("registered");
    };
    assert_eq!(pool.share_supply(), Shares::new(6_000_000));
}

//! # pair-amm
//!
//! Integer-exact pricing and accounting core for two-asset constant-product
//! liquidity pools.
//!
//! Anyone may deposit both assets of a pool to mint liquidity shares, burn
//! shares to withdraw a pro-rata slice of the reserves, or swap one asset
//! for the other along the `x * y = k` curve after a fee.  All quantities
//! are `u64`; every product of two quantities is formed in `u128`, every
//! division names its rounding direction, and rounding always favours the
//! pool.
//!
//! ## Quick start
//!
//! ```rust
//! use pair_amm::prelude::*;
//!
//! let sol = AssetId::from_bytes([1u8; 32]);
//! let usdc = AssetId::from_bytes([2u8; 32]);
//! let lp = Address::from_bytes([10u8; 32]);
//!
//! let mut engine = PoolEngine::new(
//!     EngineConfig::default(),
//!     InMemoryLedger::new(),
//!     SeededAddressDeriver::default(),
//! )
//! .expect("valid config");
//!
//! engine.ledger_mut().credit(lp, sol, Amount::new(200_000_000)).expect("fund");
//! engine.ledger_mut().credit(lp, usdc, Amount::new(200_000_000)).expect("fund");
//!
//! let key = engine.initialize(sol, usdc).expect("new pair");
//! engine
//!     .add_liquidity(&key, lp, Amount::new(150_000_000), Amount::new(150_000_000))
//!     .expect("seed");
//!
//! let out = engine
//!     .swap(&key, lp, Side::A, Amount::new(30_000_000), Amount::ZERO)
//!     .expect("swap");
//! assert_eq!(out.amount_out, Amount::new(24_979_163));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  PoolEngine  │  registry by PairKey; validate → compute → apply → settle
//! └──────┬───────┘
//!        │ PoolDelta            LedgerInstruction batch
//!        ▼                               ▼
//! ┌──────────────┐              ┌────────────────┐
//! │     Pool     │ apply_delta  │ Ledger (trait) │  InMemoryLedger
//! └──────┬───────┘              └────────────────┘
//!        │ curve functions
//!        ▼
//! ┌──────────────┐
//! │     math     │  mul_div, isqrt, div_round over u128
//! └──────────────┘
//! ```
//!
//! ## Module guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`FeeTier`](domain::FeeTier), [`AssetPair`](domain::AssetPair) |
//! | [`math`] | Wide multiply-divide, integer square root, rounding |
//! | [`pool`] | [`Pool`](pool::Pool) state, curve functions, [`PoolRecord`](pool::PoolRecord) layout |
//! | [`engine`] | [`PoolEngine`](engine::PoolEngine): initialize, deposit, withdraw, swap |
//! | [`traits`] | [`Ledger`](traits::Ledger) and [`AddressDeriver`](traits::AddressDeriver) seams |
//! | [`ledger`] | [`InMemoryLedger`](ledger::InMemoryLedger) |
//! | [`addressing`] | [`SeededAddressDeriver`](addressing::SeededAddressDeriver) |
//! | [`config`] | [`EngineConfig`](config::EngineConfig), loadable from TOML |
//! | [`error`] | [`AmmError`](error::AmmError) and [`LedgerError`](error::LedgerError) |
//!
//! ## Logging
//!
//! Engine operations emit `tracing` spans and events.  The crate never
//! installs a subscriber.

pub mod addressing;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;

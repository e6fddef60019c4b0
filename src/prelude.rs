//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use pair_amm::prelude::*;
//! ```

pub use crate::addressing::SeededAddressDeriver;
pub use crate::config::{EngineConfig, RatioPolicy};
pub use crate::domain::{
    Address, Amount, AssetId, AssetPair, BasisPoints, FeeTier, PairKey, Shares, Side,
};
pub use crate::engine::{DepositOutcome, PoolEngine, SwapOutcome, WithdrawalOutcome};
pub use crate::error::{AmmError, LedgerError, Result};
pub use crate::ledger::InMemoryLedger;
pub use crate::math::CheckedArithmetic;
pub use crate::pool::{Pool, PoolRecord, SwapQuote};
pub use crate::traits::{AddressDeriver, Ledger, LedgerInstruction, PoolAddresses};

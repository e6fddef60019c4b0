//! Unified error types for the pool core.
//!
//! Every fallible operation in the crate returns [`AmmError`].  All
//! variants are detected before any pool mutation or ledger call, except
//! [`AmmError::Ledger`], which carries the ledger collaborator's failure
//! unchanged.  No variant is retried: each aborts the enclosing operation
//! and the pool is left exactly as it was.

use crate::domain::{Address, AssetId};

/// Crate-wide result alias.
pub type Result<T, E = AmmError> = core::result::Result<T, E>;

/// Errors raised by pool math, state guards and engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// A pool already exists for this unordered asset pair.
    #[error("a pool already exists for this asset pair")]
    PoolAlreadyExists,

    /// No pool exists for the pair, or the pool holds no liquidity yet.
    #[error("pool is not initialized or holds no liquidity")]
    PoolUninitialized,

    /// Both sides of the pair name the same asset.
    #[error("asset pair requires two distinct assets")]
    InvalidAssetPair,

    /// An input amount, or a quantity derived from it, is zero.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// An intermediate or stored quantity left the representable range.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// Division by a zero denominator.
    #[error("division by zero")]
    DivisionByZero,

    /// A delta would drive a reserve or the share supply below zero.
    #[error("update would make a reserve negative")]
    NegativeReserve,

    /// A swap would decrease the constant product.
    #[error("constant-product invariant violated")]
    InvariantViolated,

    /// The swap would drain (or round to nothing against) the outbound reserve.
    #[error("insufficient reserve to fill the swap")]
    InsufficientReserve,

    /// More shares burned than exist or than the holder owns.
    #[error("insufficient liquidity shares")]
    InsufficientShares,

    /// The computed output fell below the caller's minimum.
    #[error("slippage exceeded: expected at least {expected_min}, got {actual}")]
    SlippageExceeded {
        /// Caller-supplied floor.
        expected_min: u64,
        /// Output the curve produced.
        actual: u64,
    },

    /// Deposit amounts do not match the pool ratio under the strict policy.
    #[error("deposit amounts do not match the pool ratio")]
    InvalidRatio,

    /// A redemption would pay out zero of one asset.
    #[error("withdrawn amounts would be zero")]
    ZeroWithdrawal,

    /// Fee rate outside the supported range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Configuration could not be parsed or is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A persisted pool record could not be encoded or decoded.
    #[error("pool record encoding: {0}")]
    Encoding(String),

    /// Failure reported by the ledger collaborator.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Failures reported by a [`Ledger`](crate::traits::Ledger) implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The source account does not hold enough of the asset.
    #[error("insufficient balance in {account}: needed {needed}, available {available}")]
    InsufficientBalance {
        /// Debited account.
        account: Address,
        /// Asset being moved.
        asset: AssetId,
        /// Amount requested.
        needed: u64,
        /// Amount held.
        available: u64,
    },

    /// The holder does not own enough shares of the mint to burn.
    #[error("insufficient shares of {share_mint} in {account}: needed {needed}, available {available}")]
    InsufficientShares {
        /// Holder whose shares are burned.
        account: Address,
        /// The pool's share mint.
        share_mint: Address,
        /// Shares requested.
        needed: u64,
        /// Shares held.
        available: u64,
    },

    /// Crediting the destination would overflow its balance.
    #[error("balance overflow in {account}")]
    BalanceOverflow {
        /// Credited account.
        account: Address,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slippage_message_includes_amounts() {
        let err = AmmError::SlippageExceeded {
            expected_min: 10,
            actual: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains('9'));
    }

    #[test]
    fn ledger_error_converts_transparently() {
        let ledger = LedgerError::BalanceOverflow {
            account: Address::from_bytes([7u8; 32]),
        };
        let err: AmmError = ledger.clone().into();
        assert_eq!(err, AmmError::Ledger(ledger.clone()));
        assert_eq!(err.to_string(), ledger.to_string());
    }

    #[test]
    fn overflow_carries_context() {
        let err = AmmError::ArithmeticOverflow("reserve_a");
        assert_eq!(err.to_string(), "arithmetic overflow: reserve_a");
    }
}

//! Results returned by committed engine operations.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Shares, Side};

/// A committed deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositOutcome {
    /// Side A amount moved into the vault.
    pub amount_a: Amount,
    /// Side B amount moved into the vault.
    pub amount_b: Amount,
    /// Shares minted to the depositor.
    pub minted: Shares,
}

/// A committed withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalOutcome {
    /// Side A amount paid to the holder.
    pub amount_a: Amount,
    /// Side B amount paid to the holder.
    pub amount_b: Amount,
    /// Shares burned from the holder.
    pub burned: Shares,
}

/// A committed swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Side that was sold.
    pub side_in: Side,
    /// Gross input paid into the pool.
    pub amount_in: Amount,
    /// Output paid to the trader.
    pub amount_out: Amount,
    /// Portion of `amount_in` withheld from pricing.
    pub fee: Amount,
}

//! Token movement primitives the engine relies on.
//!
//! The pool core never holds balances itself.  After a pool's reserves
//! have been updated, the engine describes the matching token movements
//! as a batch of [`LedgerInstruction`]s and hands it to a [`Ledger`].
//!
//! # Atomicity
//!
//! [`Ledger::execute`] must either apply every instruction in the batch or
//! none of them.  The default implementation runs them in order; when one
//! fails it applies the [`inverse`](LedgerInstruction::inverse) of every
//! instruction that already succeeded, newest first, before returning the
//! failure.  Ledgers that can stage a batch should override it; see
//! [`InMemoryLedger`](crate::ledger::InMemoryLedger).

use tracing::error;

use crate::domain::{Address, Amount, AssetId, Shares};
use crate::error::LedgerError;

/// One token movement requested by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerInstruction {
    /// Move `amount` of `asset` between two accounts.
    Transfer {
        /// Asset moved.
        asset: AssetId,
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Quantity.
        amount: Amount,
    },
    /// Create new pool shares for `to`.
    MintShares {
        /// The pool's share mint.
        share_mint: Address,
        /// Receiving account.
        to: Address,
        /// Quantity.
        amount: Shares,
    },
    /// Destroy pool shares held by `from`.
    BurnShares {
        /// The pool's share mint.
        share_mint: Address,
        /// Holder whose shares are destroyed.
        from: Address,
        /// Quantity.
        amount: Shares,
    },
}

impl LedgerInstruction {
    /// The instruction that undoes `self`: a transfer back, or a burn of
    /// minted shares (and the reverse).
    #[must_use]
    pub const fn inverse(&self) -> Self {
        match *self {
            Self::Transfer {
                asset,
                from,
                to,
                amount,
            } => Self::Transfer {
                asset,
                from: to,
                to: from,
                amount,
            },
            Self::MintShares {
                share_mint,
                to,
                amount,
            } => Self::BurnShares {
                share_mint,
                from: to,
                amount,
            },
            Self::BurnShares {
                share_mint,
                from,
                amount,
            } => Self::MintShares {
                share_mint,
                to: from,
                amount,
            },
        }
    }
}

/// Ledger collaborator: token transfers plus share mint and burn.
pub trait Ledger {
    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientBalance`] if `from` holds too little, or
    /// [`LedgerError::BalanceOverflow`] if `to` cannot hold the result.
    fn transfer(
        &mut self,
        asset: AssetId,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Mints `amount` shares of `share_mint` to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::BalanceOverflow`] if `to` cannot hold the result.
    fn mint_shares(
        &mut self,
        share_mint: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), LedgerError>;

    /// Burns `amount` shares of `share_mint` held by `from`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientShares`] if `from` holds too few shares.
    /// The engine relies on this variant to report
    /// [`AmmError::InsufficientShares`](crate::error::AmmError::InsufficientShares).
    fn burn_shares(
        &mut self,
        share_mint: Address,
        from: Address,
        amount: Shares,
    ) -> Result<(), LedgerError>;

    /// Applies one instruction.
    ///
    /// # Errors
    ///
    /// Whatever the underlying primitive reports.
    fn apply(&mut self, instruction: &LedgerInstruction) -> Result<(), LedgerError> {
        match *instruction {
            LedgerInstruction::Transfer {
                asset,
                from,
                to,
                amount,
            } => self.transfer(asset, from, to, amount),
            LedgerInstruction::MintShares {
                share_mint,
                to,
                amount,
            } => self.mint_shares(share_mint, to, amount),
            LedgerInstruction::BurnShares {
                share_mint,
                from,
                amount,
            } => self.burn_shares(share_mint, from, amount),
        }
    }

    /// Applies `batch` in order.  On the first failure, reverts the
    /// instructions already applied and returns that failure.
    ///
    /// # Errors
    ///
    /// The failing instruction's error, or the error of a reversal that
    /// could not be applied.
    fn execute(&mut self, batch: &[LedgerInstruction]) -> Result<(), LedgerError> {
        for (done, instruction) in batch.iter().enumerate() {
            let Err(failure) = self.apply(instruction) else {
                continue;
            };
            for applied in batch[..done].iter().rev() {
                self.apply(&applied.inverse()).inspect_err(|e| {
                    error!(error = %e, %failure, "ledger batch reversal failed");
                })?;
            }
            return Err(failure);
        }
        Ok(())
    }
}

//! In-process ledger for tests, demos and off-chain simulation.

use std::collections::HashMap;

use crate::domain::{Address, Amount, AssetId, Shares};
use crate::error::LedgerError;
use crate::traits::{Ledger, LedgerInstruction};

/// Balances kept in two hash maps: asset balances per `(account, asset)`
/// and share balances per `(share_mint, holder)`.
///
/// [`execute`](Ledger::execute) is all-or-nothing: the batch runs against a
/// scratch copy that replaces the live state only if every instruction
/// succeeds.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Address, Amount, AssetId};
/// use pair_amm::ledger::InMemoryLedger;
/// use pair_amm::traits::Ledger;
///
/// let usdc = AssetId::from_bytes([1u8; 32]);
/// let alice = Address::from_bytes([10u8; 32]);
/// let bob = Address::from_bytes([11u8; 32]);
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.credit(alice, usdc, Amount::new(100)).expect("fits");
/// ledger.transfer(usdc, alice, bob, Amount::new(40)).expect("funded");
/// assert_eq!(ledger.balance(bob, usdc), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: HashMap<(Address, AssetId), u64>,
    shares: HashMap<(Address, Address), u64>,
}

impl InMemoryLedger {
    /// An empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` of `asset` to `account` out of thin air (funding).
    ///
    /// # Errors
    ///
    /// [`LedgerError::BalanceOverflow`] if the balance would exceed `u64`.
    pub fn credit(
        &mut self,
        account: Address,
        asset: AssetId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let slot = self.balances.entry((account, asset)).or_insert(0);
        *slot = slot
            .checked_add(amount.get())
            .ok_or(LedgerError::BalanceOverflow { account })?;
        Ok(())
    }

    /// Balance of `asset` held by `account`.
    pub fn balance(&self, account: Address, asset: AssetId) -> Amount {
        Amount::new(self.balances.get(&(account, asset)).copied().unwrap_or(0))
    }

    /// Shares of `share_mint` held by `holder`.
    #[must_use]
    pub fn share_balance(&self, share_mint: Address, holder: Address) -> Shares {
        Shares::new(self.shares.get(&(share_mint, holder)).copied().unwrap_or(0))
    }

    /// Sum of every holder's shares of `share_mint`.
    #[must_use]
    pub fn share_supply(&self, share_mint: Address) -> Shares {
        let total = self
            .shares
            .iter()
            .filter(|((mint, _), _)| *mint == share_mint)
            .fold(0u64, |acc, (_, v)| acc.saturating_add(*v));
        Shares::new(total)
    }
}

impl Ledger for InMemoryLedger {
    fn transfer(
        &mut self,
        asset: AssetId,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance(from, asset).get();
        let remaining =
            available
                .checked_sub(amount.get())
                .ok_or(LedgerError::InsufficientBalance {
                    account: from,
                    asset,
                    needed: amount.get(),
                    available,
                })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to, asset)
            .get()
            .checked_add(amount.get())
            .ok_or(LedgerError::BalanceOverflow { account: to })?;
        self.balances.insert((from, asset), remaining);
        self.balances.insert((to, asset), credited);
        Ok(())
    }

    fn mint_shares(
        &mut self,
        share_mint: Address,
        to: Address,
        amount: Shares,
    ) -> Result<(), LedgerError> {
        let slot = self.shares.entry((share_mint, to)).or_insert(0);
        *slot = slot
            .checked_add(amount.get())
            .ok_or(LedgerError::BalanceOverflow { account: to })?;
        Ok(())
    }

    fn burn_shares(
        &mut self,
        share_mint: Address,
        from: Address,
        amount: Shares,
    ) -> Result<(), LedgerError> {
        let available = self.share_balance(share_mint, from).get();
        let remaining =
            available
                .checked_sub(amount.get())
                .ok_or(LedgerError::InsufficientShares {
                    account: from,
                    share_mint,
                    needed: amount.get(),
                    available,
                })?;
        self.shares.insert((share_mint, from), remaining);
        Ok(())
    }

    fn execute(&mut self, batch: &[LedgerInstruction]) -> Result<(), LedgerError> {
        let mut scratch = self.clone();
        for instruction in batch {
            scratch.apply(instruction)?;
        }
        *self = scratch;
        Ok(())
    }
}

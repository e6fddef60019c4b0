//! Deterministic addresses owned by a pool.

use crate::domain::{Address, AssetPair};

/// The four ledger accounts a pool controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolAddresses {
    /// The pool's own account; authority over the vaults and share mint.
    pub pool: Address,
    /// Mint of the pool's liquidity shares.
    pub share_mint: Address,
    /// Vault holding the side A reserve.
    pub vault_a: Address,
    /// Vault holding the side B reserve.
    pub vault_b: Address,
}

/// Derives a pool's accounts from its asset pair.
///
/// Must be deterministic: the same pair always yields the same addresses,
/// and distinct pairs must not collide.
pub trait AddressDeriver {
    /// Addresses for the pool trading `pair`.
    fn derive(&self, pair: &AssetPair) -> PoolAddresses;
}

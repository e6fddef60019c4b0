//! Hash-seeded pool addresses.
//!
//! Each pool account is `keccak256(program_id || seed || asset_a || asset_b)`
//! with one seed per account, mirroring how on-chain programs derive
//! program-owned accounts from fixed seeds and the pair's mints.

use sha3::{Digest, Keccak256};

use crate::domain::{Address, AssetPair};
use crate::traits::{AddressDeriver, PoolAddresses};

const POOL_SEED: &[u8] = b"pool";
const SHARE_MINT_SEED: &[u8] = b"lp_mint";
const VAULT_A_SEED: &[u8] = b"vault_a";
const VAULT_B_SEED: &[u8] = b"vault_b";

/// [`AddressDeriver`] that hashes a program id, a per-account seed and the
/// two asset ids in bookkeeping order.
///
/// # Examples
///
/// ```
/// use pair_amm::addressing::SeededAddressDeriver;
/// use pair_amm::domain::{AssetId, AssetPair};
/// use pair_amm::traits::AddressDeriver;
///
/// let deriver = SeededAddressDeriver::new([7u8; 32]);
/// let pair = AssetPair::new(AssetId::from_bytes([1u8; 32]), AssetId::from_bytes([2u8; 32]))
///     .expect("distinct");
/// let addrs = deriver.derive(&pair);
/// assert_ne!(addrs.vault_a, addrs.vault_b);
/// assert_eq!(addrs, deriver.derive(&pair));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededAddressDeriver {
    program_id: [u8; 32],
}

impl SeededAddressDeriver {
    /// Deriver scoped to `program_id`.
    #[must_use]
    pub const fn new(program_id: [u8; 32]) -> Self {
        Self { program_id }
    }

    fn account(&self, seed: &[u8], pair: &AssetPair) -> Address {
        let mut hasher = Keccak256::new();
        hasher.update(self.program_id);
        hasher.update(seed);
        hasher.update(pair.asset_a().as_bytes());
        hasher.update(pair.asset_b().as_bytes());
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Address::from_bytes(bytes)
    }
}

impl Default for SeededAddressDeriver {
    fn default() -> Self {
        Self::new([0u8; 32])
    }
}

impl AddressDeriver for SeededAddressDeriver {
    fn derive(&self, pair: &AssetPair) -> PoolAddresses {
        PoolAddresses {
            pool: self.account(POOL_SEED, pair),
            share_mint: self.account(SHARE_MINT_SEED, pair),
            vault_a: self.account(VAULT_A_SEED, pair),
            vault_b: self.account(VAULT_B_SEED, pair),
        }
    }
}

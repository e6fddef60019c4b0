//! Asset pairs and their order-independent keys.

use super::{AssetId, Side};
use crate::error::AmmError;

/// Two distinct assets in bookkeeping order: the first is side A.
///
/// Unlike [`PairKey`], an `AssetPair` remembers the order the caller used at
/// initialization, because reserves and vaults are labelled A and B by that
/// order for the life of the pool.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{AssetId, AssetPair, Side};
///
/// let usdc = AssetId::from_bytes([2u8; 32]);
/// let sol = AssetId::from_bytes([1u8; 32]);
/// let pair = AssetPair::new(usdc, sol).expect("distinct assets");
/// assert_eq!(pair.asset(Side::A), usdc);
///
/// // Lookup key ignores order.
/// let flipped = AssetPair::new(sol, usdc).expect("distinct assets");
/// assert_eq!(pair.key(), flipped.key());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetPair {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl AssetPair {
    /// Creates a pair with `asset_a` as side A.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAssetPair`] if both ids are equal.
    pub fn new(asset_a: AssetId, asset_b: AssetId) -> Result<Self, AmmError> {
        if asset_a == asset_b {
            return Err(AmmError::InvalidAssetPair);
        }
        Ok(Self { asset_a, asset_b })
    }

    /// Side A's asset.
    #[must_use]
    pub const fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    /// Side B's asset.
    #[must_use]
    pub const fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    /// The asset held on `side`.
    #[must_use]
    pub const fn asset(&self, side: Side) -> AssetId {
        match side {
            Side::A => self.asset_a,
            Side::B => self.asset_b,
        }
    }

    /// Canonical unordered key for registry lookup.
    #[must_use]
    pub fn key(&self) -> PairKey {
        PairKey::from_unordered(self.asset_a, self.asset_b)
    }
}

/// Order-independent identity of an asset pair: the lower id comes first.
///
/// `(X, Y)` and `(Y, X)` produce the same key, which is what makes "one pool
/// per unordered pair" enforceable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    lo: AssetId,
    hi: AssetId,
}

impl PairKey {
    /// Builds the key for two assets given in any order.
    ///
    /// Equal ids yield a degenerate key; [`AssetPair::new`] rejects those
    /// before a key is ever stored.
    #[must_use]
    pub fn from_unordered(x: AssetId, y: AssetId) -> Self {
        if x <= y {
            Self { lo: x, hi: y }
        } else {
            Self { lo: y, hi: x }
        }
    }

    /// The lower asset id.
    #[must_use]
    pub const fn lo(&self) -> AssetId {
        self.lo
    }

    /// The higher asset id.
    #[must_use]
    pub const fn hi(&self) -> AssetId {
        self.hi
    }
}

impl core::fmt::Display for PairKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // first four bytes of each id
        write!(f, "{:.8}/{:.8}", self.lo.to_string(), self.hi.to_string())
    }
}

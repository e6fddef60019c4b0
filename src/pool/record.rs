//! Fixed-width persisted layout of a pool.
//!
//! A [`PoolRecord`] is what a host stores for each pool: two asset ids,
//! both reserves, the share supply and the fee rate.  It is encoded with
//! `bincode`'s fixed-int little-endian format, giving exactly
//! [`PoolRecord::ENCODED_LEN`] bytes.

use serde::{Deserialize, Serialize};

use super::Pool;
use crate::domain::{Amount, AssetId, AssetPair, FeeTier, Shares};
use crate::error::AmmError;

/// Flat storage form of a [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    /// Side A asset id.
    pub asset_a: [u8; 32],
    /// Side B asset id.
    pub asset_b: [u8; 32],
    /// Reserve of side A.
    pub reserve_a: u64,
    /// Reserve of side B.
    pub reserve_b: u64,
    /// Outstanding shares.
    pub share_supply: u64,
    /// Swap fee in basis points.
    pub fee_rate_bps: u16,
}

impl PoolRecord {
    /// Size of an encoded record in bytes.
    pub const ENCODED_LEN: usize = 32 + 32 + 8 + 8 + 8 + 2;

    /// Serializes to [`ENCODED_LEN`](Self::ENCODED_LEN) bytes.
    ///
    /// # Errors
    ///
    /// [`AmmError::Encoding`] if the serializer fails.
    pub fn encode(&self) -> Result<Vec<u8>, AmmError> {
        bincode::serialize(self).map_err(|e| AmmError::Encoding(e.to_string()))
    }

    /// Parses a record previously produced by [`encode`](Self::encode).
    ///
    /// # Errors
    ///
    /// [`AmmError::Encoding`] if `bytes` has the wrong length or cannot be
    /// decoded.
    pub fn decode(bytes: &[u8]) -> Result<Self, AmmError> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(AmmError::Encoding(format!(
                "expected {} bytes, got {}",
                Self::ENCODED_LEN,
                bytes.len()
            )));
        }
        bincode::deserialize(bytes).map_err(|e| AmmError::Encoding(e.to_string()))
    }
}

impl Pool {
    /// Flattens the pool for storage.
    #[must_use]
    pub fn to_record(&self) -> PoolRecord {
        PoolRecord {
            asset_a: self.asset_a().as_bytes(),
            asset_b: self.asset_b().as_bytes(),
            reserve_a: self.reserve_a().get(),
            reserve_b: self.reserve_b().get(),
            share_supply: self.share_supply().get(),
            fee_rate_bps: self.fee_tier().basis_points().get(),
        }
    }

    /// Rebuilds a pool from storage, re-checking what the type system
    /// cannot carry through bytes.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAssetPair`] if both asset ids are equal.
    /// - [`AmmError::InvalidFee`] if the stored fee is 100% or more.
    pub fn from_record(record: &PoolRecord) -> Result<Self, AmmError> {
        let pair = AssetPair::new(
            AssetId::from_bytes(record.asset_a),
            AssetId::from_bytes(record.asset_b),
        )?;
        let fee_tier = FeeTier::try_from(record.fee_rate_bps)?;
        Ok(Self::from_parts(
            pair,
            Amount::new(record.reserve_a),
            Amount::new(record.reserve_b),
            Shares::new(record.share_supply),
            fee_tier,
        ))
    }
}

//! Opaque asset identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one fungible asset on the ledger (a mint address).
///
/// The pool never interprets the bytes; it only compares them, orders them
/// to build [`PairKey`](super::PairKey)s and feeds them to address
/// derivation.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::AssetId;
///
/// let usdc = AssetId::from_bytes([1u8; 32]);
/// assert_eq!(usdc.as_bytes(), [1u8; 32]);
/// assert!(usdc.to_string().starts_with("0101"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_lexicographic() {
        let lo = AssetId::from_bytes([0u8; 32]);
        let mut hi_bytes = [0u8; 32];
        hi_bytes[31] = 1;
        assert!(lo < AssetId::from_bytes(hi_bytes));
    }

    #[test]
    fn display_is_lowercase_hex() {
        let id = AssetId::from_bytes([0xabu8; 32]);
        let shown = id.to_string();
        assert_eq!(shown.len(), 64);
        assert!(shown.chars().all(|c| c == 'a' || c == 'b'));
    }
}

//! Ledger account addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A 32-byte ledger account: a user wallet, a pool vault, the pool's own
/// account or its share mint.
///
/// Pool-owned addresses come from an
/// [`AddressDeriver`](crate::traits::AddressDeriver); user addresses are
/// supplied by the caller and never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; 32]);

impl Address {
    /// Creates an `Address` from raw bytes.
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

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

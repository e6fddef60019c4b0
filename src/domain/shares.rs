//! Liquidity-share quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A quantity of liquidity shares for one pool.
///
/// Distinct from [`Amount`](super::Amount) because it measures a pro-rata
/// claim on both reserves rather than a quantity of either asset.  Per-holder
/// balances live in the ledger; the pool only tracks the total.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Shares;
///
/// let supply = Shares::new(100_000_000);
/// let minted = Shares::new(50_000_000);
/// assert_eq!(supply.checked_add(&minted), Some(Shares::new(150_000_000)));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Shares(u64);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw `u64` share count.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying `u64`.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if there are no shares.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub const fn checked_sub(&self, other: &Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

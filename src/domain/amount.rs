//! Raw asset quantity with checked arithmetic.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A raw asset quantity in the ledger's smallest unit.
///
/// Reserves, deposits and swap amounts are all 64-bit on the ledger, so
/// `Amount` wraps a `u64`.  Products of two amounts are formed in `u128`
/// by the [`math`](crate::math) layer, never here.
///
/// Arithmetic methods are checked: they return `None` on overflow or
/// underflow instead of wrapping.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Amount;
///
/// let a = Amount::new(100);
/// let b = Amount::new(250);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(350)));
/// assert_eq!(a.checked_sub(&b), None);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
#[must_use]
pub struct Amount(u64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Largest representable amount.
    pub const MAX: Self = Self(u64::MAX);

    /// Wraps a raw `u64` quantity.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying `u64`.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the amount is zero.
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

    /// Widens to `u128` for use in intermediate products.
    #[must_use]
    pub const fn widen(&self) -> u128 {
        self.0 as u128
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

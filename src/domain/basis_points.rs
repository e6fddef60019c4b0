//! Basis-point representation for fee rates.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::math::{div_round, Rounding};

/// Denominator that represents 100%.
const BPS_DENOMINATOR: u16 = 10_000;

/// A rate expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Stored as `u16` to match the persisted pool layout.  Values above
/// 10 000 are representable but meaningless as a rate;
/// [`FeeTier`](super::FeeTier) rejects them.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::BasisPoints;
///
/// let bp = BasisPoints::new(10);
/// assert_eq!(bp.get(), 10);
/// assert_eq!(bp.complement().map(|c| c.get()), Some(9_990));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// 100% expressed in basis points.
    pub const MAX_PERCENT: Self = Self(BPS_DENOMINATOR);

    /// Creates a new `BasisPoints` from a raw `u16` value.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the underlying `u16` value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `10_000 - self`, or `None` when `self` exceeds 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match BPS_DENOMINATOR.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// The product is formed in `u128` and a `u64 × u16` product always
    /// fits, so the only failure is a result above `u64::MAX`, which can
    /// only happen for rates above 100%.
    #[must_use]
    pub fn apply(&self, amount: Amount, rounding: Rounding) -> Option<Amount> {
        let product = amount.widen() * u128::from(self.0);
        let scaled = div_round(product, u128::from(BPS_DENOMINATOR), rounding)?;
        u64::try_from(scaled).ok().map(Amount::new)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}

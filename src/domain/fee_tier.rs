//! Swap fee rate fixed at pool creation.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, BasisPoints};
use crate::error::AmmError;
use crate::math::Rounding;

/// The swap fee charged by a pool, in basis points.
///
/// A pool's tier is chosen when it is initialized and never changes.  Only
/// rates strictly below 100% are accepted: at 100% every input would be
/// consumed by the fee and every swap would price to zero.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::DEFAULT;
/// assert_eq!(tier.basis_points().get(), 10);
/// assert_eq!(tier.amount_after_fee(Amount::new(30_000_000)).map(|a| a.get()), Ok(29_970_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.10%, the rate new pools use unless configured otherwise.
    pub const DEFAULT: Self = Self(BasisPoints::new(10));

    /// No fee.  Swaps at this tier keep the product constant up to rounding.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// Creates a tier after checking the rate is below 100%.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `basis_points >= 10_000`.
    pub const fn new(basis_points: BasisPoints) -> Result<Self, AmmError> {
        if basis_points.get() >= BasisPoints::MAX_PERCENT.get() {
            return Err(AmmError::InvalidFee("fee must be below 10000 bp"));
        }
        Ok(Self(basis_points))
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Portion of `amount_in` that enters the pricing curve:
    /// `floor(amount_in * (10_000 - fee) / 10_000)`.
    ///
    /// Flooring the net input charges the trader the rounding remainder.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] only if the tier invariant
    /// was bypassed.
    pub fn amount_after_fee(&self, amount_in: Amount) -> Result<Amount, AmmError> {
        self.0
            .complement()
            .and_then(|keep| keep.apply(amount_in, Rounding::Down))
            .ok_or(AmmError::ArithmeticOverflow("fee complement"))
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u16> for FeeTier {
    type Error = AmmError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(BasisPoints::new(value))
    }
}

impl From<FeeTier> for u16 {
    fn from(tier: FeeTier) -> Self {
        tier.0.get()
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}

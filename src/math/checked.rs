//! Error-returning arithmetic for quantity newtypes.
//!
//! [`CheckedArithmetic`] lifts the `Option`-returning `checked_*` methods of
//! [`Amount`] and [`Shares`] into [`AmmError`] results carrying the name of
//! the quantity that went out of range, so engine code can use `?`.
//!
//! # Examples
//!
//! ```
//! use pair_amm::domain::Amount;
//! use pair_amm::error::AmmError;
//! use pair_amm::math::CheckedArithmetic;
//!
//! let r = Amount::MAX.safe_add(&Amount::new(1), "reserve_a");
//! assert_eq!(r, Err(AmmError::ArithmeticOverflow("reserve_a")));
//! ```

use crate::domain::{Amount, Shares};
use crate::error::AmmError;

/// Fallible add/sub for quantity newtypes.
///
/// Overflow maps to [`AmmError::ArithmeticOverflow`]; underflow maps to
/// [`AmmError::NegativeReserve`] since every quantity here is a balance
/// that may not go below zero.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`AmmError::ArithmeticOverflow`] carrying `context`.
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`AmmError::NegativeReserve`] if `other > self`.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other).ok_or(AmmError::NegativeReserve)
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self, context: &'static str) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow(context))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other).ok_or(AmmError::NegativeReserve)
    }
}

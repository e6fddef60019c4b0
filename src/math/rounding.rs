//! Rounding direction and rounded integer division.
//!
//! Every division in the pool math names its direction.  The rule is that
//! the pool never loses to rounding:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal, minted shares | [`Rounding::Down`] |
//! | Product kept in the pool after a swap | [`Rounding::Up`] |
//!
//! # Examples
//!
//! ```
//! use pair_amm::math::{div_round, Rounding};
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Some(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Some(4));
//! assert_eq!(div_round(10, 0, Rounding::Down), None);
//! ```

/// Direction to round a non-exact quotient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Towards positive infinity (ceiling).
    Up,
    /// Towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` for [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Divides `numerator` by `denominator`, rounding as requested.
///
/// Returns `None` when `denominator` is zero.  The ceiling is computed from
/// quotient and remainder, so it cannot overflow for any `u128` input.
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let quotient = numerator / denominator;
    if rounding.is_up() && numerator % denominator != 0 {
        // quotient < u128::MAX whenever a remainder exists
        Some(quotient + 1)
    } else {
        Some(quotient)
    }
}

//! Products and quotients of `u64` quantities through `u128`.
//!
//! Two `u64` values always multiply without overflow in `u128`, so the only
//! failure points are a zero divisor and a result that no longer fits back
//! into `u64`.  Both are reported as errors, never wrapped or saturated.

use super::{div_round, Rounding};
use crate::error::AmmError;

/// Exact product of two `u64` values.
#[must_use]
pub const fn product(a: u64, b: u64) -> u128 {
    (a as u128) * (b as u128)
}

/// Computes `a * b / d` with a 128-bit intermediate and explicit rounding.
///
/// # Errors
///
/// - [`AmmError::DivisionByZero`] if `d == 0`.
/// - [`AmmError::ArithmeticOverflow`] if the quotient exceeds `u64::MAX`;
///   `context` names the quantity being computed.
///
/// # Examples
///
/// ```
/// use pair_amm::math::{mul_div, Rounding};
///
/// // 50M shares of a 150M supply against a 180M reserve
/// let out = mul_div(180_000_000, 50_000_000, 150_000_000, Rounding::Down, "withdraw");
/// assert_eq!(out, Ok(60_000_000));
/// ```
pub fn mul_div(
    a: u64,
    b: u64,
    d: u64,
    rounding: Rounding,
    context: &'static str,
) -> Result<u64, AmmError> {
    let q = div_round(product(a, b), u128::from(d), rounding).ok_or(AmmError::DivisionByZero)?;
    narrow(q, context)
}

/// Narrows a `u128` back to `u64`.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] with `context` if it does not fit.
pub fn narrow(value: u128, context: &'static str) -> Result<u64, AmmError> {
    u64::try_from(value).map_err(|_| AmmError::ArithmeticOverflow(context))
}

/// Integer square root: the largest `r` with `r * r <= n`.
///
/// Newton iteration seeded from the bit length, so it converges in a handful
/// of steps for any `u128`.  The root of a `u128` always fits in `u64`.
///
/// # Examples
///
/// ```
/// use pair_amm::math::isqrt;
///
/// assert_eq!(isqrt(10_000_000_000_000_000), 100_000_000);
/// assert_eq!(isqrt(15), 3);
/// ```
#[must_use]
pub const fn isqrt(n: u128) -> u64 {
    if n < 2 {
        return n as u64;
    }
    let bits = 128 - n.leading_zeros();
    // 2^ceil(bits/2) >= sqrt(n)
    let mut x: u128 = 1u128 << bits.div_ceil(2);
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            break;
        }
        x = y;
    }
    x as u64
}

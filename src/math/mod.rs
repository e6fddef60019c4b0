//! Overflow-safe integer arithmetic for pool math.
//!
//! All quantities are `u64`; any product of two of them is formed in `u128`
//! ([`product`], [`mul_div`]) and narrowed back with an explicit error when
//! it does not fit.  Division always names its [`Rounding`] direction.

mod checked;
mod rounding;
mod wide;

pub use checked::CheckedArithmetic;
pub use rounding::{div_round, Rounding};
pub use wide::{isqrt, mul_div, narrow, product};

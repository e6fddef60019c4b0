//! Which side of a pool an operation acts on.

use serde::{Deserialize, Serialize};

/// One of the two bookkeeping sides of a pool.
///
/// In a swap this names the asset being sold; the other side is bought.
///
/// # Examples
///
/// ```
/// use pair_amm::domain::Side;
///
/// assert_eq!(Side::A.opposite(), Side::B);
/// assert_eq!(Side::B.opposite().opposite(), Side::B);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The pool's first asset (`asset_a`).
    A,
    /// The pool's second asset (`asset_b`).
    B,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

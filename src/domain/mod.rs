//! Value types shared by the math layer, pool state and engine.
//!
//! Quantities are `u64` newtypes ([`Amount`], [`Shares`]) with checked
//! arithmetic; identities are opaque 32-byte ids ([`AssetId`], [`Address`]);
//! fees are [`BasisPoints`] wrapped in a validated [`FeeTier`].

mod address;
mod amount;
mod asset;
mod asset_pair;
mod basis_points;
mod fee_tier;
mod shares;
mod side;

pub use address::Address;
pub use amount::Amount;
pub use asset::AssetId;
pub use asset_pair::{AssetPair, PairKey};
pub use basis_points::BasisPoints;
pub use fee_tier::FeeTier;
pub use shares::Shares;
pub use side::Side;

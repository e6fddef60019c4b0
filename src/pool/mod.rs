//! Pool state, pricing curve and persisted layout.
//!
//! - [`Pool`] holds reserves, share supply and fee for one asset pair and
//!   changes only through [`Pool::apply_delta`].
//! - [`swap_output`], [`shares_for_deposit`], [`amounts_for_shares`] and
//!   [`check_deposit_ratio`] are the pure curve functions the engine uses
//!   to size each [`PoolDelta`].
//! - [`PoolRecord`] is the 90-byte storage form.

mod curve;
mod record;
mod state;

pub use curve::{
    amounts_for_shares, check_deposit_ratio, shares_for_deposit, swap_output, SwapQuote,
};
pub use record::PoolRecord;
pub use state::{DeltaKind, Pool, PoolDelta, SpotPrice};

//! Collaborator seams: the ledger that moves tokens and the deriver that
//! names a pool's accounts.
//!
//! The engine is generic over both, so hosts plug in their own while tests
//! and demos use [`InMemoryLedger`](crate::ledger::InMemoryLedger) and
//! [`SeededAddressDeriver`](crate::addressing::SeededAddressDeriver).

mod address_deriver;
mod ledger;

pub use address_deriver::{AddressDeriver, PoolAddresses};
pub use ledger::{Ledger, LedgerInstruction};

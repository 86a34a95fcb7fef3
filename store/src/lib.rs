//! Abstract storage traits for the Vesta ledger.
//!
//! Storage backends (an embedded database, an in-memory map for testing)
//! implement these traits. The ledger depends only on the traits and owns the
//! encoding of its own records.

pub mod error;
pub mod ledger;

pub use error::StoreError;
pub use ledger::LedgerStore;

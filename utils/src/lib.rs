//! Shared utilities for the Vesta ledger.

pub mod logging;

pub use logging::{init_logging, LogFormat};

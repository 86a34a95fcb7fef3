//! Fundamental types for the Vesta ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, fixed-point token amounts, timestamps and the clock capability.

pub mod address;
pub mod amount;
pub mod time;

pub use address::{AccountAddress, AddressError};
pub use amount::{AmountParseError, TokenAmount, TOKEN_DECIMALS, TOKEN_UNIT};
pub use time::{Clock, SystemClock, Timestamp};

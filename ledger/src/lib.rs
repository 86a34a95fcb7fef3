//! Vesting token ledger.
//!
//! A fixed supply is minted to the issuer at genesis. The issuer distributes
//! it in batches; each entry is either free immediately or locked under a
//! vesting schedule. Holders transfer and burn freely, but only the portion of
//! their balance that is not still locked by their own grants.

pub mod authority;
pub mod balances;
pub mod config;
pub mod distribution;
pub mod error;
pub mod event;
pub mod guard;
pub mod persistence;
pub mod service;
pub mod snapshot;
pub mod token;

pub use authority::{Authority, SingleIssuer};
pub use balances::BalanceLedger;
pub use config::{LedgerConfig, LoggingConfig};
pub use distribution::{DistributionBatch, DistributionEntry};
pub use error::LedgerError;
pub use event::{EventBus, LedgerEvent};
pub use guard::TransferGuard;
pub use service::LedgerService;
pub use snapshot::{AccountSnapshot, LedgerSnapshot};
pub use token::TokenLedger;

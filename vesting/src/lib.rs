//! Vesting: the time-lock engine behind every grant.
//!
//! A grant locks its whole amount until the schedule's cliff, then releases it
//! in a straight line over the unlock window:
//! `locked(g, t) = amount − amount × (t − cliff_end) / unlock` for `cliff_end < t < unlock_end`.
//!
//! This crate handles:
//! - Schedule kinds and their configurable cliff/unlock terms
//! - Locked/unlocked computation for a single grant
//! - The per-account grant ledger and its aggregate queries

pub mod calculator;
pub mod error;
pub mod grant;
pub mod registry;
pub mod schedule;

pub use calculator::VestingCalculator;
pub use error::VestingError;
pub use grant::Grant;
pub use registry::GrantLedger;
pub use schedule::{ScheduleKind, ScheduleTerms, VestingConfig};

//! Vesting-specific errors.

use vesta_types::AccountAddress;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VestingError {
    #[error("invalid schedule kind (tag {tag}): only private-sale and investor grants vest")]
    InvalidScheduleKind { tag: u8 },

    #[error("grant amount must be non-zero")]
    InvalidAmount,

    #[error("account {0} is not on a vesting schedule")]
    NoVestingSchedule(AccountAddress),

    #[error("unlock window for {kind} must be non-zero")]
    InvalidTerms { kind: String },

    #[error("arithmetic overflow in vesting computation")]
    Overflow,
}

//! The immutable vesting grant record.

use crate::schedule::{ScheduleKind, ScheduleTerms};
use serde::{Deserialize, Serialize};
use vesta_types::{AccountAddress, Timestamp, TokenAmount};

/// An amount bound to one account under a vesting schedule.
///
/// Grants are never edited or revoked. `kind` is never `Immediate`; the
/// [`GrantLedger`](crate::GrantLedger) refuses to record one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub owner: AccountAddress,
    pub kind: ScheduleKind,
    pub amount: TokenAmount,
    /// Start of the schedule; cliff and unlock window are measured from here.
    pub created_at: Timestamp,
}

impl Grant {
    pub fn cliff_end(&self, terms: &ScheduleTerms) -> Timestamp {
        terms.cliff_end(self.created_at)
    }

    pub fn unlock_end(&self, terms: &ScheduleTerms) -> Timestamp {
        terms.unlock_end(self.created_at)
    }
}

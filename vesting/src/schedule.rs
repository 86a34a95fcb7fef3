//! Schedule kinds and their cliff/unlock terms.

use crate::error::VestingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vesta_types::Timestamp;

/// How a distributed amount is released to its recipient.
///
/// The set is closed: `Immediate` credits free balance and never produces a
/// grant, the other two lock the amount under the terms configured for them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleKind {
    Immediate,
    PrivateSale,
    Investor,
}

impl ScheduleKind {
    pub const ALL: [ScheduleKind; 3] = [Self::Immediate, Self::PrivateSale, Self::Investor];

    /// Wire tag used by batch callers that encode kinds as integers.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Immediate => 0,
            Self::PrivateSale => 1,
            Self::Investor => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, VestingError> {
        match tag {
            0 => Ok(Self::Immediate),
            1 => Ok(Self::PrivateSale),
            2 => Ok(Self::Investor),
            _ => Err(VestingError::InvalidScheduleKind { tag }),
        }
    }

    /// Whether amounts distributed under this kind are recorded as grants.
    pub fn vests(&self) -> bool {
        !matches!(self, Self::Immediate)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::PrivateSale => "private-sale",
            Self::Investor => "investor",
        }
    }
}

impl TryFrom<u8> for ScheduleKind {
    type Error = VestingError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown schedule kind {s:?}"))
    }
}

/// Cliff and linear-unlock durations for one schedule kind, in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTerms {
    /// Interval after grant creation during which the whole amount is locked.
    pub cliff_secs: u64,
    /// Length of the straight-line release that follows the cliff.
    pub unlock_secs: u64,
}

impl ScheduleTerms {
    pub const fn new(cliff_secs: u64, unlock_secs: u64) -> Self {
        Self {
            cliff_secs,
            unlock_secs,
        }
    }

    pub fn cliff_end(&self, created_at: Timestamp) -> Timestamp {
        created_at.saturating_add(self.cliff_secs)
    }

    /// The instant at which a grant under these terms is fully unlocked.
    pub fn unlock_end(&self, created_at: Timestamp) -> Timestamp {
        self.cliff_end(created_at).saturating_add(self.unlock_secs)
    }

    pub fn total_secs(&self) -> u64 {
        self.cliff_secs.saturating_add(self.unlock_secs)
    }

    fn scaled(&self, unit_secs: u64) -> Self {
        Self {
            cliff_secs: self.cliff_secs.saturating_mul(unit_secs),
            unlock_secs: self.unlock_secs.saturating_mul(unit_secs),
        }
    }
}

/// Terms for every vesting schedule kind.
///
/// The defaults are the reference terms in seconds: private sale unlocks
/// between 3 and 13, investor between 5 and 15.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingConfig {
    #[serde(default = "default_private_sale")]
    pub private_sale: ScheduleTerms,
    #[serde(default = "default_investor")]
    pub investor: ScheduleTerms,
}

pub const PRIVATE_SALE_TERMS: ScheduleTerms = ScheduleTerms::new(3, 10);
pub const INVESTOR_TERMS: ScheduleTerms = ScheduleTerms::new(5, 10);

fn default_private_sale() -> ScheduleTerms {
    PRIVATE_SALE_TERMS
}

fn default_investor() -> ScheduleTerms {
    INVESTOR_TERMS
}

impl VestingConfig {
    /// The reference terms multiplied by a time unit, e.g. `30 * 86_400` to
    /// read them as months.
    pub fn scaled(unit_secs: u64) -> Self {
        Self {
            private_sale: PRIVATE_SALE_TERMS.scaled(unit_secs),
            investor: INVESTOR_TERMS.scaled(unit_secs),
        }
    }

    /// Terms for a kind; `None` for kinds that never vest.
    pub fn terms(&self, kind: ScheduleKind) -> Option<ScheduleTerms> {
        match kind {
            ScheduleKind::Immediate => None,
            ScheduleKind::PrivateSale => Some(self.private_sale),
            ScheduleKind::Investor => Some(self.investor),
        }
    }

    pub fn validate(&self) -> Result<(), VestingError> {
        for kind in [ScheduleKind::PrivateSale, ScheduleKind::Investor] {
            if let Some(terms) = self.terms(kind) {
                if terms.unlock_secs == 0 {
                    return Err(VestingError::InvalidTerms {
                        kind: kind.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for VestingConfig {
    fn default() -> Self {
        Self {
            private_sale: PRIVATE_SALE_TERMS,
            investor: INVESTOR_TERMS,
        }
    }
}

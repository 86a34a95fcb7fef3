//! Locked/unlocked computation for a single grant.

use crate::grant::Grant;
use crate::schedule::{ScheduleTerms, VestingConfig};
use vesta_types::{Timestamp, TokenAmount};

/// Computes how much of a grant is still locked at a given time.
///
/// Holds the schedule terms for every kind; grants only carry their kind, so
/// one calculator serves every grant on the ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VestingCalculator {
    config: VestingConfig,
}

impl VestingCalculator {
    pub fn new(config: VestingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VestingConfig {
        &self.config
    }

    /// Portion of `grant` that is still locked at `now`.
    ///
    /// A grant whose kind has no terms (never the case for recorded grants)
    /// is treated as fully free.
    pub fn locked_portion(&self, grant: &Grant, now: Timestamp) -> TokenAmount {
        match self.config.terms(grant.kind) {
            Some(terms) => locked_amount(grant.amount, &terms, grant.created_at, now),
            None => TokenAmount::ZERO,
        }
    }

    pub fn unlocked_portion(&self, grant: &Grant, now: Timestamp) -> TokenAmount {
        grant.amount.saturating_sub(self.locked_portion(grant, now))
    }

    /// When `grant` becomes fully unlocked.
    pub fn full_unlock_at(&self, grant: &Grant) -> Timestamp {
        match self.config.terms(grant.kind) {
            Some(terms) => grant.unlock_end(&terms),
            None => grant.created_at,
        }
    }

    /// Cliff end and full-unlock instants for `grant`.
    pub fn boundaries(&self, grant: &Grant) -> (Timestamp, Timestamp) {
        match self.config.terms(grant.kind) {
            Some(terms) => (grant.cliff_end(&terms), grant.unlock_end(&terms)),
            None => (grant.created_at, grant.created_at),
        }
    }
}

/// Straight-line lock for `amount` created at `created_at` under `terms`.
///
/// - `now ≤ cliff_end`: the whole amount.
/// - `cliff_end < now < unlock_end`: `amount − ⌊amount × elapsed / unlock⌋`.
/// - `now ≥ unlock_end`: zero.
///
/// A zero-length unlock window is a hard cliff.
pub fn locked_amount(
    amount: TokenAmount,
    terms: &ScheduleTerms,
    created_at: Timestamp,
    now: Timestamp,
) -> TokenAmount {
    let cliff_end = terms.cliff_end(created_at);
    if now <= cliff_end {
        return amount;
    }
    let unlock_end = terms.unlock_end(created_at);
    if now >= unlock_end {
        return TokenAmount::ZERO;
    }
    // Strictly inside the window, so 0 < elapsed < unlock_secs.
    let elapsed = cliff_end.elapsed_since(now);
    let released = mul_div_floor(amount.raw(), elapsed, terms.unlock_secs);
    TokenAmount::new(amount.raw() - released)
}

/// `⌊a × num / den⌋` for `num < den`, without a 256-bit intermediate.
///
/// Splits `a = q × den + r`; `q × num < a` and `r × num < den²` both fit in u128.
fn mul_div_floor(a: u128, num: u64, den: u64) -> u128 {
    let (num, den) = (num as u128, den as u128);
    let q = a / den;
    let r = a % den;
    q * num + (r * num) / den
}

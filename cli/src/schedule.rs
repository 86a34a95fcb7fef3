//! `vesta schedule`: a grant's unlock curve as text.

use vesta_ledger::LedgerConfig;
use vesta_types::{Timestamp, TokenAmount};
use vesta_vesting::calculator::locked_amount;
use vesta_vesting::{ScheduleKind, ScheduleTerms};

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// A span of seconds as its non-zero day/hour/minute/second parts, e.g. `1d 30s`.
fn span(secs: u64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }
    let mut rest = secs;
    let mut parts = Vec::new();
    for (size, unit) in UNITS {
        if rest >= size {
            parts.push(format!("{}{unit}", rest / size));
            rest %= size;
        }
    }
    parts.join(" ")
}

/// One-line summary of a vesting kind's terms.
fn describe_terms(kind: ScheduleKind, amount: TokenAmount, terms: &ScheduleTerms) -> String {
    format!(
        "{kind}: {amount} tokens, cliff {}, linear unlock over {}, fully unlocked after {}",
        span(terms.cliff_secs),
        span(terms.unlock_secs),
        span(terms.total_secs()),
    )
}

/// Default sample offsets: start, cliff end, quarter points, full unlock.
fn default_offsets(terms: &ScheduleTerms) -> Vec<u64> {
    let cliff = terms.cliff_secs;
    let unlock = terms.unlock_secs;
    let mut offsets = vec![0, cliff];
    offsets.extend((1..4).map(|q| cliff.saturating_add(unlock.saturating_mul(q) / 4)));
    offsets.push(terms.total_secs());
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

/// Lines describing how `amount` granted under `kind` unlocks.
pub fn render(
    config: &LedgerConfig,
    kind: ScheduleKind,
    amount: TokenAmount,
    at: &[u64],
) -> Vec<String> {
    let Some(terms) = config.schedules.terms(kind) else {
        return vec![format!("{kind}: {amount} tokens are free on distribution")];
    };

    let mut lines = vec![describe_terms(kind, amount, &terms)];

    let offsets = if at.is_empty() {
        default_offsets(&terms)
    } else {
        at.to_vec()
    };
    for offset in offsets {
        let locked = locked_amount(amount, &terms, Timestamp::EPOCH, Timestamp::new(offset));
        let unlocked = amount.saturating_sub(locked);
        lines.push(format!(
            "  +{:<10} locked {:<24} unlocked {unlocked}",
            span(offset),
            locked.to_string(),
        ));
    }
    lines
}

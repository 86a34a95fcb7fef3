//! Distribution batches and their staging.

use crate::balances::BalanceLedger;
use crate::error::LedgerError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vesta_types::{AccountAddress, TokenAmount};
use vesta_vesting::{GrantLedger, ScheduleKind};

/// One `(recipient, amount, kind)` triple of a distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub recipient: AccountAddress,
    pub amount: TokenAmount,
    pub kind: ScheduleKind,
}

/// An ordered batch of distribution entries.
///
/// Entries apply in sequence: each debits the issuer's running balance, so
/// a later entry sees the effect of every earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionBatch {
    pub entries: Vec<DistributionEntry>,
}

/// The outcome of a batch computed against current balances, not yet applied.
#[derive(Debug)]
pub(crate) struct StagedDistribution {
    /// Final balance of every account the batch touches.
    pub balances: HashMap<AccountAddress, TokenAmount>,
    /// Grants to record, in batch order.
    pub grants: Vec<DistributionEntry>,
}

impl DistributionBatch {
    pub fn new(entries: Vec<DistributionEntry>) -> Self {
        Self { entries }
    }

    /// Zip three parallel sequences, failing if their lengths differ.
    pub fn from_parallel(
        recipients: &[AccountAddress],
        amounts: &[TokenAmount],
        kinds: &[ScheduleKind],
    ) -> Result<Self, LedgerError> {
        if recipients.len() != amounts.len() || amounts.len() != kinds.len() {
            return Err(LedgerError::MalformedBatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
                kinds: kinds.len(),
            });
        }
        let entries = recipients
            .iter()
            .zip(amounts)
            .zip(kinds)
            .map(|((recipient, amount), kind)| DistributionEntry {
                recipient: recipient.clone(),
                amount: *amount,
                kind: *kind,
            })
            .collect();
        Ok(Self { entries })
    }

    /// Like [`from_parallel`](Self::from_parallel), with kinds as wire tags.
    pub fn from_tagged(
        recipients: &[AccountAddress],
        amounts: &[TokenAmount],
        tags: &[u8],
    ) -> Result<Self, LedgerError> {
        if recipients.len() != amounts.len() || amounts.len() != tags.len() {
            return Err(LedgerError::MalformedBatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
                kinds: tags.len(),
            });
        }
        let kinds = tags
            .iter()
            .map(|tag| ScheduleKind::from_tag(*tag))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_parallel(recipients, amounts, &kinds)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry amounts.
    pub fn total(&self) -> Option<TokenAmount> {
        self.entries
            .iter()
            .try_fold(TokenAmount::ZERO, |acc, e| acc.checked_add(e.amount))
    }

    /// Run the batch against an overlay of `balances` without touching them.
    ///
    /// `issuer_locked` is the issuer's own locked amount when the batch
    /// starts; the issuer spends only what lies above it, and vesting entries
    /// addressed to the issuer raise it.
    pub(crate) fn stage(
        &self,
        balances: &BalanceLedger,
        issuer: &AccountAddress,
        issuer_locked: TokenAmount,
    ) -> Result<StagedDistribution, LedgerError> {
        let mut overlay: HashMap<AccountAddress, TokenAmount> = HashMap::new();
        let mut grants = Vec::new();
        let mut issuer_locked = issuer_locked;

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.amount.is_zero() {
                return Err(LedgerError::InvalidAmount { index });
            }
            if entry.kind.vests() {
                GrantLedger::check_grant(entry.kind, entry.amount)?;
            }

            let available = overlay
                .get(issuer)
                .copied()
                .unwrap_or_else(|| balances.balance_of(issuer));
            let issuer_after =
                available
                    .checked_sub(entry.amount)
                    .ok_or_else(|| LedgerError::InsufficientBalance {
                        account: issuer.clone(),
                        needed: entry.amount,
                        available,
                    })?;
            let free = available.saturating_sub(issuer_locked);
            if entry.amount > free {
                return Err(LedgerError::InsufficientUnlockedBalance {
                    account: issuer.clone(),
                    needed: entry.amount,
                    free,
                    locked: issuer_locked,
                });
            }
            overlay.insert(issuer.clone(), issuer_after);

            let recipient_before = overlay
                .get(&entry.recipient)
                .copied()
                .unwrap_or_else(|| balances.balance_of(&entry.recipient));
            let recipient_after = recipient_before
                .checked_add(entry.amount)
                .ok_or(LedgerError::Overflow)?;
            overlay.insert(entry.recipient.clone(), recipient_after);

            if entry.kind.vests() {
                if &entry.recipient == issuer {
                    issuer_locked = issuer_locked
                        .checked_add(entry.amount)
                        .ok_or(LedgerError::Overflow)?;
                }
                grants.push(entry.clone());
            }
        }

        Ok(StagedDistribution {
            balances: overlay,
            grants,
        })
    }
}

//! Per-account grant ledger.

use crate::calculator::VestingCalculator;
use crate::error::VestingError;
use crate::grant::Grant;
use crate::schedule::{ScheduleKind, VestingConfig};
use std::collections::HashMap;
use vesta_types::{AccountAddress, Timestamp, TokenAmount};

/// Every grant on the ledger, grouped by owner in insertion order.
///
/// Aggregate queries (`granted_amount`, `locked_amount`, `unlocked_amount`)
/// are sums over the owner's grants, each timed from its own `created_at`.
/// Accounts without grants get [`VestingError::NoVestingSchedule`] rather than
/// zero, so "never vested" stays distinguishable from "fully released".
#[derive(Clone, Debug, Default)]
pub struct GrantLedger {
    grants: HashMap<AccountAddress, Vec<Grant>>,
    calculator: VestingCalculator,
}

impl GrantLedger {
    pub fn new(config: VestingConfig) -> Self {
        Self {
            grants: HashMap::new(),
            calculator: VestingCalculator::new(config),
        }
    }

    pub fn calculator(&self) -> &VestingCalculator {
        &self.calculator
    }

    /// Append a new grant for `owner` starting at `now`.
    pub fn record_grant(
        &mut self,
        owner: &AccountAddress,
        kind: ScheduleKind,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<&Grant, VestingError> {
        Self::check_grant(kind, amount)?;
        let grants = self.grants.entry(owner.clone()).or_default();
        let index = grants.len();
        grants.push(Grant {
            owner: owner.clone(),
            kind,
            amount,
            created_at: now,
        });
        Ok(&grants[index])
    }

    /// The checks `record_grant` applies, without recording anything.
    pub fn check_grant(kind: ScheduleKind, amount: TokenAmount) -> Result<(), VestingError> {
        if !kind.vests() {
            return Err(VestingError::InvalidScheduleKind { tag: kind.tag() });
        }
        if amount.is_zero() {
            return Err(VestingError::InvalidAmount);
        }
        Ok(())
    }

    /// Grants held by `owner`, oldest first. Empty if none.
    pub fn grants_of(&self, owner: &AccountAddress) -> &[Grant] {
        self.grants.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_on_vesting_schedule(&self, owner: &AccountAddress) -> bool {
        !self.grants_of(owner).is_empty()
    }

    /// Sum of every grant amount held by `owner`.
    pub fn granted_amount(&self, owner: &AccountAddress) -> Result<TokenAmount, VestingError> {
        self.require_grants(owner)?
            .iter()
            .try_fold(TokenAmount::ZERO, |acc, g| acc.checked_add(g.amount))
            .ok_or(VestingError::Overflow)
    }

    /// Amount of `owner`'s grants still locked at `now`.
    pub fn locked_amount(
        &self,
        owner: &AccountAddress,
        now: Timestamp,
    ) -> Result<TokenAmount, VestingError> {
        self.sum_locked(self.require_grants(owner)?, now)
    }

    /// Amount of `owner`'s grants already released at `now`.
    pub fn unlocked_amount(
        &self,
        owner: &AccountAddress,
        now: Timestamp,
    ) -> Result<TokenAmount, VestingError> {
        let granted = self.granted_amount(owner)?;
        let locked = self.locked_amount(owner, now)?;
        granted.checked_sub(locked).ok_or(VestingError::Overflow)
    }

    /// Locked amount, or zero for accounts that hold no grants.
    pub fn locked_or_zero(
        &self,
        owner: &AccountAddress,
        now: Timestamp,
    ) -> Result<TokenAmount, VestingError> {
        self.sum_locked(self.grants_of(owner), now)
    }

    /// Next cliff end or full unlock strictly after `now`, if any remain.
    pub fn next_unlock_event(&self, owner: &AccountAddress, now: Timestamp) -> Option<Timestamp> {
        self.grants_of(owner)
            .iter()
            .flat_map(|g| {
                let (cliff_end, unlock_end) = self.calculator.boundaries(g);
                [cliff_end, unlock_end]
            })
            .filter(|t| *t > now)
            .min()
    }

    /// Accounts holding at least one grant.
    pub fn accounts(&self) -> impl Iterator<Item = &AccountAddress> {
        self.grants.keys()
    }

    pub fn grant_count(&self) -> usize {
        self.grants.values().map(Vec::len).sum()
    }

    /// Replace `owner`'s grant list wholesale, e.g. when restoring from storage.
    pub fn restore_grants(&mut self, owner: AccountAddress, grants: Vec<Grant>) {
        if grants.is_empty() {
            self.grants.remove(&owner);
        } else {
            self.grants.insert(owner, grants);
        }
    }

    fn require_grants(&self, owner: &AccountAddress) -> Result<&[Grant], VestingError> {
        let grants = self.grants_of(owner);
        if grants.is_empty() {
            return Err(VestingError::NoVestingSchedule(owner.clone()));
        }
        Ok(grants)
    }

    fn sum_locked(&self, grants: &[Grant], now: Timestamp) -> Result<TokenAmount, VestingError> {
        grants
            .iter()
            .try_fold(TokenAmount::ZERO, |acc, g| {
                acc.checked_add(self.calculator.locked_portion(g, now))
            })
            .ok_or(VestingError::Overflow)
    }
}

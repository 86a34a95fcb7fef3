//! The token ledger: balances, grants and the operations over them.

use crate::authority::Authority;
use crate::balances::BalanceLedger;
use crate::config::LedgerConfig;
use crate::distribution::DistributionBatch;
use crate::error::LedgerError;
use crate::event::LedgerEvent;
use crate::guard::TransferGuard;
use crate::snapshot::{AccountSnapshot, LedgerSnapshot};
use std::collections::BTreeSet;
use vesta_types::{AccountAddress, Timestamp, TokenAmount};
use vesta_vesting::{Grant, GrantLedger, VestingConfig};

/// A vesting token ledger.
///
/// Plain sequential state machine: every mutation takes `&mut self` and the
/// instant it happens at, validates completely, then writes. On error the
/// ledger is unchanged. Wrap it in a [`LedgerService`](crate::LedgerService)
/// for shared access.
#[derive(Clone, Debug)]
pub struct TokenLedger {
    pub(crate) balances: BalanceLedger,
    pub(crate) grants: GrantLedger,
    pub(crate) issuer: AccountAddress,
}

impl TokenLedger {
    /// Genesis: mint `supply` into `issuer`.
    pub fn new(issuer: AccountAddress, supply: TokenAmount, vesting: VestingConfig) -> Self {
        Self {
            balances: BalanceLedger::genesis(&issuer, supply),
            grants: GrantLedger::new(vesting),
            issuer,
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self::new(
            config.issuer.clone(),
            config.initial_supply(),
            config.schedules,
        ))
    }

    pub(crate) fn from_parts(
        issuer: AccountAddress,
        balances: BalanceLedger,
        grants: GrantLedger,
    ) -> Self {
        Self {
            balances,
            grants,
            issuer,
        }
    }

    pub fn issuer(&self) -> &AccountAddress {
        &self.issuer
    }

    pub fn vesting_config(&self) -> &VestingConfig {
        self.grants.calculator().config()
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Credit every entry of `batch` out of the issuer's balance.
    ///
    /// Vesting entries also record a grant created at `now`. The batch is
    /// staged first and committed only if every entry is valid.
    pub fn distribute<A: Authority>(
        &mut self,
        authority: &A,
        caller: &AccountAddress,
        batch: &DistributionBatch,
        now: Timestamp,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        if !authority.is_issuer(caller) {
            return Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            });
        }
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let issuer_locked = self.grants.locked_or_zero(&self.issuer, now)?;
        let staged = batch.stage(&self.balances, &self.issuer, issuer_locked)?;
        let total = batch.total().ok_or(LedgerError::Overflow)?;

        // Nothing below can fail: amounts and kinds were checked during staging.
        self.balances.apply_staged(staged.balances);
        let mut events = Vec::with_capacity(staged.grants.len() + 1);
        for entry in staged.grants {
            let grant = self
                .grants
                .record_grant(&entry.recipient, entry.kind, entry.amount, now)?;
            events.push(LedgerEvent::GrantRecorded {
                owner: grant.owner.clone(),
                kind: grant.kind,
                amount: grant.amount,
                created_at: grant.created_at,
            });
        }
        events.insert(
            0,
            LedgerEvent::Distributed {
                issuer: self.issuer.clone(),
                entries: batch.len(),
                total,
            },
        );
        Ok(events)
    }

    /// Move `amount` of `from`'s free balance to `to`.
    pub fn transfer(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<LedgerEvent, LedgerError> {
        self.balances.ensure_available(from, amount)?;
        TransferGuard::assert_transferable(&self.balances, &self.grants, from, amount, now)?;
        self.balances.move_balance(from, to, amount)?;
        Ok(LedgerEvent::Transferred {
            from: from.clone(),
            to: to.clone(),
            amount,
        })
    }

    /// Destroy `amount` of `account`'s free balance.
    pub fn burn(
        &mut self,
        account: &AccountAddress,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<LedgerEvent, LedgerError> {
        self.balances.ensure_available(account, amount)?;
        TransferGuard::assert_transferable(&self.balances, &self.grants, account, amount, now)?;
        self.balances.burn(account, amount)?;
        Ok(LedgerEvent::Burned {
            account: account.clone(),
            amount,
        })
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn balance_of(&self, account: &AccountAddress) -> TokenAmount {
        self.balances.balance_of(account)
    }

    pub fn granted_amount(&self, account: &AccountAddress) -> Result<TokenAmount, LedgerError> {
        Ok(self.grants.granted_amount(account)?)
    }

    pub fn locked_amount(
        &self,
        account: &AccountAddress,
        now: Timestamp,
    ) -> Result<TokenAmount, LedgerError> {
        Ok(self.grants.locked_amount(account, now)?)
    }

    pub fn unlocked_amount(
        &self,
        account: &AccountAddress,
        now: Timestamp,
    ) -> Result<TokenAmount, LedgerError> {
        Ok(self.grants.unlocked_amount(account, now)?)
    }

    pub fn is_on_vesting_schedule(&self, account: &AccountAddress) -> bool {
        self.grants.is_on_vesting_schedule(account)
    }

    /// Balance spendable at `now`: nominal balance minus the locked portion.
    pub fn free_balance(
        &self,
        account: &AccountAddress,
        now: Timestamp,
    ) -> Result<TokenAmount, LedgerError> {
        TransferGuard::free_balance(&self.balances, &self.grants, account, now).map(|(free, _)| free)
    }

    pub fn grants_of(&self, account: &AccountAddress) -> &[Grant] {
        self.grants.grants_of(account)
    }

    pub fn next_unlock_event(&self, account: &AccountAddress, now: Timestamp) -> Option<Timestamp> {
        self.grants.next_unlock_event(account, now)
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.balances.total_supply()
    }

    pub fn initial_supply(&self) -> TokenAmount {
        self.balances.initial_supply()
    }

    pub fn total_burned(&self) -> TokenAmount {
        self.balances.total_burned()
    }

    /// Every account with a balance record or a grant, sorted.
    pub fn accounts(&self) -> Vec<AccountAddress> {
        let mut set: BTreeSet<&AccountAddress> = self.balances.accounts().map(|(a, _)| a).collect();
        set.extend(self.grants.accounts());
        set.into_iter().cloned().collect()
    }

    /// Capture every account's balance and vesting state at `now`.
    pub fn snapshot(&self, now: Timestamp) -> Result<LedgerSnapshot, LedgerError> {
        let accounts = self
            .accounts()
            .into_iter()
            .map(|address| {
                let (free, locked) =
                    TransferGuard::free_balance(&self.balances, &self.grants, &address, now)?;
                Ok(AccountSnapshot {
                    balance: self.balances.balance_of(&address),
                    free,
                    locked,
                    grants: self.grants.grants_of(&address).to_vec(),
                    address,
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        Ok(LedgerSnapshot {
            taken_at: now,
            issuer: self.issuer.clone(),
            initial_supply: self.balances.initial_supply(),
            total_supply: self.balances.total_supply(),
            total_burned: self.balances.total_burned(),
            accounts,
        })
    }
}

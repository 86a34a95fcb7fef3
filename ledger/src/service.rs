//! Shared, clock-driven access to a [`TokenLedger`].

use crate::authority::{Authority, SingleIssuer};
use crate::distribution::DistributionBatch;
use crate::error::LedgerError;
use crate::event::{EventBus, LedgerEvent};
use crate::snapshot::LedgerSnapshot;
use crate::token::TokenLedger;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use vesta_store::LedgerStore;
use vesta_types::{AccountAddress, Clock, Timestamp, TokenAmount};
use vesta_vesting::{Grant, ScheduleKind};

/// A [`TokenLedger`] behind a reader/writer lock, with its clock and authority.
///
/// Mutations take the write lock and read the clock exactly once while holding
/// it, so every grant of a batch shares one `created_at`. Queries take the
/// read lock and run concurrently. Events go out after the write lock is
/// released; listeners may query the service.
pub struct LedgerService<C: Clock, A: Authority = SingleIssuer> {
    ledger: RwLock<TokenLedger>,
    clock: C,
    authority: A,
    events: RwLock<EventBus>,
}

impl<C: Clock> LedgerService<C, SingleIssuer> {
    /// Only the ledger's own issuer may distribute.
    pub fn new(ledger: TokenLedger, clock: C) -> Self {
        let authority = SingleIssuer(ledger.issuer().clone());
        Self::with_authority(ledger, clock, authority)
    }
}

impl<C: Clock, A: Authority> LedgerService<C, A> {
    pub fn with_authority(ledger: TokenLedger, clock: C, authority: A) -> Self {
        Self {
            ledger: RwLock::new(ledger),
            clock,
            authority,
            events: RwLock::new(EventBus::new()),
        }
    }

    // Every mutation validates before it writes, so a poisoned lock still
    // guards a consistent ledger.
    fn read(&self) -> RwLockReadGuard<'_, TokenLedger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TokenLedger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, events: &[LedgerEvent]) {
        self.events
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .emit_all(events);
    }

    pub fn subscribe(&self, listener: Box<dyn Fn(&LedgerEvent) + Send + Sync>) {
        self.events
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribe(listener);
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Distribute from the issuer to parallel `recipients`/`amounts`/`kinds`.
    pub fn distribute(
        &self,
        caller: &AccountAddress,
        recipients: &[AccountAddress],
        amounts: &[TokenAmount],
        kinds: &[ScheduleKind],
    ) -> Result<(), LedgerError> {
        self.ensure_issuer(caller)
            .and_then(|()| DistributionBatch::from_parallel(recipients, amounts, kinds))
            .inspect_err(|e| tracing::warn!(caller = %caller, error = %e, "distribution rejected"))
            .and_then(|batch| self.distribute_batch(caller, &batch))
    }

    /// Like [`distribute`](Self::distribute), with kinds given as wire tags.
    pub fn distribute_tagged(
        &self,
        caller: &AccountAddress,
        recipients: &[AccountAddress],
        amounts: &[TokenAmount],
        tags: &[u8],
    ) -> Result<(), LedgerError> {
        self.ensure_issuer(caller)
            .and_then(|()| DistributionBatch::from_tagged(recipients, amounts, tags))
            .inspect_err(|e| tracing::warn!(caller = %caller, error = %e, "distribution rejected"))
            .and_then(|batch| self.distribute_batch(caller, &batch))
    }

    pub fn distribute_batch(
        &self,
        caller: &AccountAddress,
        batch: &DistributionBatch,
    ) -> Result<(), LedgerError> {
        let events = {
            let mut ledger = self.write();
            let now = self.clock.now();
            match ledger.distribute(&self.authority, caller, batch, now) {
                Ok(events) => {
                    tracing::info!(
                        caller = %caller,
                        entries = batch.len(),
                        grants = events.len().saturating_sub(1),
                        now = %now,
                        "distribution committed"
                    );
                    events
                }
                Err(e) => {
                    tracing::warn!(caller = %caller, error = %e, "distribution rejected");
                    return Err(e);
                }
            }
        };
        self.emit(&events);
        Ok(())
    }

    pub fn transfer(
        &self,
        caller: &AccountAddress,
        to: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let event = {
            let mut ledger = self.write();
            let now = self.clock.now();
            ledger
                .transfer(caller, to, amount, now)
                .inspect(|_| {
                    tracing::info!(from = %caller, to = %to, amount = %amount, "transfer committed")
                })
                .inspect_err(|e| {
                    tracing::warn!(from = %caller, to = %to, amount = %amount, error = %e, "transfer rejected")
                })?
        };
        self.emit(std::slice::from_ref(&event));
        Ok(())
    }

    pub fn burn(&self, caller: &AccountAddress, amount: TokenAmount) -> Result<(), LedgerError> {
        let event = {
            let mut ledger = self.write();
            let now = self.clock.now();
            ledger
                .burn(caller, amount, now)
                .inspect(|_| tracing::info!(account = %caller, amount = %amount, "burn committed"))
                .inspect_err(|e| {
                    tracing::warn!(account = %caller, amount = %amount, error = %e, "burn rejected")
                })?
        };
        self.emit(std::slice::from_ref(&event));
        Ok(())
    }

    fn ensure_issuer(&self, caller: &AccountAddress) -> Result<(), LedgerError> {
        if self.authority.is_issuer(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            })
        }
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn balance_of(&self, account: &AccountAddress) -> TokenAmount {
        self.read().balance_of(account)
    }

    pub fn granted_amount(&self, account: &AccountAddress) -> Result<TokenAmount, LedgerError> {
        self.read().granted_amount(account)
    }

    pub fn locked_amount(&self, account: &AccountAddress) -> Result<TokenAmount, LedgerError> {
        let ledger = self.read();
        let now = self.clock.now();
        let locked = ledger.locked_amount(account, now);
        tracing::debug!(account = %account, now = %now, ok = locked.is_ok(), "locked amount");
        locked
    }

    pub fn unlocked_amount(&self, account: &AccountAddress) -> Result<TokenAmount, LedgerError> {
        let ledger = self.read();
        let now = self.clock.now();
        let unlocked = ledger.unlocked_amount(account, now);
        tracing::debug!(account = %account, now = %now, ok = unlocked.is_ok(), "unlocked amount");
        unlocked
    }

    pub fn is_on_vesting_schedule(&self, account: &AccountAddress) -> bool {
        self.read().is_on_vesting_schedule(account)
    }

    pub fn free_balance(&self, account: &AccountAddress) -> Result<TokenAmount, LedgerError> {
        let ledger = self.read();
        ledger.free_balance(account, self.clock.now())
    }

    pub fn grants_of(&self, account: &AccountAddress) -> Vec<Grant> {
        self.read().grants_of(account).to_vec()
    }

    pub fn next_unlock_event(&self, account: &AccountAddress) -> Option<Timestamp> {
        let ledger = self.read();
        ledger.next_unlock_event(account, self.clock.now())
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.read().total_supply()
    }

    pub fn total_burned(&self) -> TokenAmount {
        self.read().total_burned()
    }

    pub fn issuer(&self) -> AccountAddress {
        self.read().issuer().clone()
    }

    pub fn snapshot(&self) -> Result<LedgerSnapshot, LedgerError> {
        let ledger = self.read();
        ledger.snapshot(self.clock.now())
    }

    /// Persist the current state. Holds the read lock for the whole write-out.
    pub fn save_to_store(&self, store: &dyn LedgerStore) -> Result<(), LedgerError> {
        let ledger = self.read();
        ledger.save_to_store(store)?;
        tracing::info!(supply = %ledger.total_supply(), "ledger saved to store");
        Ok(())
    }

    /// Give the ledger back, e.g. for persistence after shutdown.
    pub fn into_inner(self) -> TokenLedger {
        self.ledger.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

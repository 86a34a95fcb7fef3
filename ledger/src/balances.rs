//! Nominal balances and total supply.

use crate::error::LedgerError;
use std::collections::HashMap;
use vesta_types::{AccountAddress, TokenAmount};

/// Debit/credit bookkeeping over nominal balances.
///
/// Balances here include locked tokens; the lock is applied on top by the
/// [`TransferGuard`](crate::TransferGuard). Supply is fixed at genesis and only
/// decreases through [`burn`](Self::burn), so at all times
/// `Σ balances == total_supply` and `total_supply + total_burned == initial_supply`.
#[derive(Clone, Debug)]
pub struct BalanceLedger {
    balances: HashMap<AccountAddress, TokenAmount>,
    initial_supply: TokenAmount,
    total_supply: TokenAmount,
    total_burned: TokenAmount,
}

impl BalanceLedger {
    /// Mint the whole supply into `issuer`.
    pub fn genesis(issuer: &AccountAddress, supply: TokenAmount) -> Self {
        let mut ledger = Self {
            balances: HashMap::new(),
            initial_supply: supply,
            total_supply: supply,
            total_burned: TokenAmount::ZERO,
        };
        ledger.set(issuer, supply);
        ledger
    }

    /// Rebuild from stored records. Fails if the records do not add up.
    pub fn restore(
        balances: HashMap<AccountAddress, TokenAmount>,
        initial_supply: TokenAmount,
        total_burned: TokenAmount,
    ) -> Result<Self, LedgerError> {
        let total_supply = balances
            .values()
            .try_fold(TokenAmount::ZERO, |acc, b| acc.checked_add(*b))
            .ok_or(LedgerError::Overflow)?;
        let accounted = total_supply
            .checked_add(total_burned)
            .ok_or(LedgerError::Overflow)?;
        if accounted != initial_supply {
            return Err(LedgerError::Store(vesta_store::StoreError::Corruption(format!(
                "balances {total_supply} + burned {total_burned} != initial supply {initial_supply}"
            ))));
        }
        Ok(Self {
            balances,
            initial_supply,
            total_supply,
            total_burned,
        })
    }

    pub fn balance_of(&self, account: &AccountAddress) -> TokenAmount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    pub fn initial_supply(&self) -> TokenAmount {
        self.initial_supply
    }

    pub fn total_burned(&self) -> TokenAmount {
        self.total_burned
    }

    /// Accounts holding a non-zero balance.
    pub fn accounts(&self) -> impl Iterator<Item = (&AccountAddress, &TokenAmount)> {
        self.balances.iter()
    }

    /// Fail unless `account` holds at least `amount`, locked or not.
    pub fn ensure_available(
        &self,
        account: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(account);
        if amount > available {
            return Err(LedgerError::InsufficientBalance {
                account: account.clone(),
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    pub fn credit(&mut self, account: &AccountAddress, amount: TokenAmount) -> Result<(), LedgerError> {
        let updated = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set(account, updated);
        Ok(())
    }

    pub fn debit(&mut self, account: &AccountAddress, amount: TokenAmount) -> Result<(), LedgerError> {
        self.ensure_available(account, amount)?;
        let updated = self.balance_of(account) - amount;
        self.set(account, updated);
        Ok(())
    }

    /// Move `amount` from `from` to `to`; nothing is written unless both sides succeed.
    pub fn move_balance(
        &mut self,
        from: &AccountAddress,
        to: &AccountAddress,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        self.ensure_available(from, amount)?;
        if from == to || amount.is_zero() {
            return Ok(());
        }
        let from_after = self.balance_of(from) - amount;
        let to_after = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set(from, from_after);
        self.set(to, to_after);
        Ok(())
    }

    /// Destroy `amount` from `account`, shrinking total supply.
    pub fn burn(&mut self, account: &AccountAddress, amount: TokenAmount) -> Result<(), LedgerError> {
        self.ensure_available(account, amount)?;
        if amount.is_zero() {
            return Ok(());
        }
        let burned = self
            .total_burned
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.debit(account, amount)?;
        self.total_supply = self.total_supply - amount;
        self.total_burned = burned;
        Ok(())
    }

    /// Overwrite balances computed elsewhere (a staged distribution).
    ///
    /// The caller guarantees the writes preserve `Σ balances == total_supply`.
    pub(crate) fn apply_staged(&mut self, staged: HashMap<AccountAddress, TokenAmount>) {
        for (account, balance) in staged {
            self.set(&account, balance);
        }
    }

    /// Empty balances are not kept as records.
    fn set(&mut self, account: &AccountAddress, balance: TokenAmount) {
        if balance.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(account.clone(), balance);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(name: &str) -> AccountAddress {
        AccountAddress::new(name)
    }

    fn tokens(n: u128) -> TokenAmount {
        TokenAmount::from_tokens(n)
    }

    fn sum(ledger: &BalanceLedger) -> TokenAmount {
        ledger.accounts().map(|(_, b)| *b).sum()
    }

    #[test]
    fn genesis_credits_issuer_with_full_supply() {
        let ledger = BalanceLedger::genesis(&addr("issuer"), tokens(1_000_000));
        assert_eq!(ledger.balance_of(&addr("issuer")), tokens(1_000_000));
        assert_eq!(ledger.balance_of(&addr("stranger")), TokenAmount::ZERO);
        assert_eq!(ledger.total_supply(), tokens(1_000_000));
        assert_eq!(ledger.total_burned(), TokenAmount::ZERO);
    }

    #[test]
    fn debit_beyond_balance_fails_and_changes_nothing() {
        let mut ledger = BalanceLedger::genesis(&addr("issuer"), tokens(10));
        let err = ledger.debit(&addr("issuer"), tokens(11)).unwrap_err();
        match err {
            LedgerError::InsufficientBalance { needed, available, .. } => {
                assert_eq!(needed, tokens(11));
                assert_eq!(available, tokens(10));
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
        assert_eq!(ledger.balance_of(&addr("issuer")), tokens(10));
    }

    #[test]
    fn move_balance_conserves_supply() {
        let mut ledger = BalanceLedger::genesis(&addr("issuer"), tokens(100));
        ledger.move_balance(&addr("issuer"), &addr("a"), tokens(40)).unwrap();
        ledger.move_balance(&addr("a"), &addr("a"), tokens(40)).unwrap();
        assert_eq!(ledger.balance_of(&addr("a")), tokens(40));
        assert_eq!(ledger.balance_of(&addr("issuer")), tokens(60));
        assert_eq!(sum(&ledger), ledger.total_supply());
    }

    #[test]
    fn burn_shrinks_supply() {
        let mut ledger = BalanceLedger::genesis(&addr("issuer"), tokens(100));
        ledger.burn(&addr("issuer"), tokens(1)).unwrap();
        assert_eq!(ledger.total_supply(), tokens(99));
        assert_eq!(ledger.total_burned(), tokens(1));
        assert_eq!(ledger.initial_supply(), tokens(100));
        assert_eq!(sum(&ledger), ledger.total_supply());
        assert!(ledger.burn(&addr("issuer"), tokens(100)).is_err());
        assert_eq!(ledger.total_supply(), tokens(99));
    }

    #[test]
    fn zero_amounts_leave_no_records() {
        let mut ledger = BalanceLedger::genesis(&addr("issuer"), tokens(100));
        ledger.move_balance(&addr("ghost"), &addr("other"), TokenAmount::ZERO).unwrap();
        ledger.burn(&addr("ghost"), TokenAmount::ZERO).unwrap();
        ledger.credit(&addr("ghost"), TokenAmount::ZERO).unwrap();
        ledger.debit(&addr("ghost"), TokenAmount::ZERO).unwrap();
        assert_eq!(ledger.accounts().count(), 1);
        assert_eq!(ledger.total_burned(), TokenAmount::ZERO);
    }

    #[test]
    fn emptied_accounts_are_dropped() {
        let mut ledger = BalanceLedger::genesis(&addr("issuer"), tokens(100));
        ledger.move_balance(&addr("issuer"), &addr("a"), tokens(40)).unwrap();
        ledger.burn(&addr("a"), tokens(40)).unwrap();
        let accounts: Vec<_> = ledger.accounts().map(|(a, _)| a.as_str()).collect();
        assert_eq!(accounts, vec!["issuer"]);
        assert_eq!(sum(&ledger), ledger.total_supply());
    }

    #[test]
    fn restore_rejects_records_that_do_not_add_up() {
        let mut balances = HashMap::new();
        balances.insert(addr("issuer"), tokens(90));
        assert!(BalanceLedger::restore(balances.clone(), tokens(100), tokens(10)).is_ok());
        assert!(matches!(
            BalanceLedger::restore(balances, tokens(100), tokens(5)),
            Err(LedgerError::Store(_))
        ));
    }
}

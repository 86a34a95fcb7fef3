//! Nullable store: thread-safe in-memory storage for testing.

use std::collections::HashMap;
use std::sync::Mutex;
use vesta_store::{LedgerStore, StoreError};
use vesta_types::AccountAddress;

/// An in-memory ledger store for testing.
#[derive(Default)]
pub struct NullLedgerStore {
    balances: Mutex<HashMap<AccountAddress, Vec<u8>>>,
    grants: Mutex<HashMap<AccountAddress, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl NullLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for NullLedgerStore {
    fn put_balance(&self, account: &AccountAddress, record: &[u8]) -> Result<(), StoreError> {
        self.balances
            .lock()
            .unwrap()
            .insert(account.clone(), record.to_vec());
        Ok(())
    }

    fn iter_balances(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn put_grants(&self, account: &AccountAddress, record: &[u8]) -> Result<(), StoreError> {
        self.grants
            .lock()
            .unwrap()
            .insert(account.clone(), record.to_vec());
        Ok(())
    }

    fn iter_grants(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError> {
        Ok(self
            .grants
            .lock()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.meta.lock().unwrap().get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.meta
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.balances.lock().unwrap().clear();
        self.grants.lock().unwrap().clear();
        self.meta.lock().unwrap().clear();
        Ok(())
    }
}

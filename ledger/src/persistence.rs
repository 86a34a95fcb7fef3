//! Saving and restoring a [`TokenLedger`] through a [`LedgerStore`].

use crate::balances::BalanceLedger;
use crate::error::LedgerError;
use crate::token::TokenLedger;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use vesta_store::{LedgerStore, StoreError};
use vesta_types::{AccountAddress, TokenAmount};
use vesta_vesting::{Grant, GrantLedger, VestingConfig};

const SCHEMA_VERSION: u32 = 1;

const META_SCHEMA_VERSION: &[u8] = b"schema_version";
const META_ISSUER: &[u8] = b"issuer";
const META_INITIAL_SUPPLY: &[u8] = b"initial_supply";
const META_TOTAL_BURNED: &[u8] = b"total_burned";
const META_VESTING_CONFIG: &[u8] = b"vesting_config";

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, LedgerError> {
    bincode::serialize(value).map_err(|e| LedgerError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LedgerError> {
    bincode::deserialize(bytes).map_err(|e| LedgerError::Serialization(e.to_string()))
}

fn required_meta<T: DeserializeOwned>(
    store: &dyn LedgerStore,
    key: &[u8],
) -> Result<T, LedgerError> {
    let bytes = store
        .get_meta(key)?
        .ok_or_else(|| StoreError::NotFound(String::from_utf8_lossy(key).into_owned()))?;
    decode(&bytes)
}

impl TokenLedger {
    /// Replace the contents of `store` with every balance, grant list and
    /// supply counter of this ledger.
    pub fn save_to_store(&self, store: &dyn LedgerStore) -> Result<(), LedgerError> {
        store.clear()?;
        store.put_meta(META_SCHEMA_VERSION, &encode(&SCHEMA_VERSION)?)?;
        store.put_meta(META_ISSUER, &encode(&self.issuer)?)?;
        store.put_meta(META_INITIAL_SUPPLY, &encode(&self.balances.initial_supply())?)?;
        store.put_meta(META_TOTAL_BURNED, &encode(&self.balances.total_burned())?)?;
        store.put_meta(META_VESTING_CONFIG, &encode(self.vesting_config())?)?;

        for (account, balance) in self.balances.accounts() {
            store.put_balance(account, &encode(balance)?)?;
        }
        for account in self.grants.accounts() {
            let grants = self.grants.grants_of(account);
            store.put_grants(account, &encode(&grants)?)?;
        }
        Ok(())
    }

    /// Rebuild a ledger from `store`.
    ///
    /// Fails with [`StoreError::NotFound`] on an empty store and
    /// [`StoreError::Corruption`] when the records contradict each other.
    pub fn load_from_store(store: &dyn LedgerStore) -> Result<Self, LedgerError> {
        let version: u32 = required_meta(store, META_SCHEMA_VERSION)?;
        if version != SCHEMA_VERSION {
            return Err(StoreError::Corruption(format!(
                "unsupported schema version {version} (expected {SCHEMA_VERSION})"
            ))
            .into());
        }
        let issuer: AccountAddress = required_meta(store, META_ISSUER)?;
        let initial_supply: TokenAmount = required_meta(store, META_INITIAL_SUPPLY)?;
        let total_burned: TokenAmount = required_meta(store, META_TOTAL_BURNED)?;
        let vesting: VestingConfig = required_meta(store, META_VESTING_CONFIG)?;

        let mut balances = HashMap::new();
        for (account, bytes) in store.iter_balances()? {
            let balance: TokenAmount = decode(&bytes)?;
            balances.insert(account, balance);
        }
        let balances = BalanceLedger::restore(balances, initial_supply, total_burned)?;

        let mut grants = GrantLedger::new(vesting);
        for (account, bytes) in store.iter_grants()? {
            let list: Vec<Grant> = decode(&bytes)?;
            if let Some(stray) = list.iter().find(|g| g.owner != account) {
                return Err(StoreError::Corruption(format!(
                    "grant owned by {} stored under {account}",
                    stray.owner
                ))
                .into());
            }
            grants.restore_grants(account, list);
        }

        Ok(Self::from_parts(issuer, balances, grants))
    }
}

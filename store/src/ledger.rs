use crate::StoreError;
use vesta_types::AccountAddress;

/// Store trait for persisting ledger state to durable storage.
///
/// Uses opaque `Vec<u8>` values so the store does not depend on the
/// `vesta-ledger` or `vesta-vesting` crates. The ledger serializes and
/// deserializes its own balance, grant and metadata records.
pub trait LedgerStore {
    fn put_balance(&self, account: &AccountAddress, record: &[u8]) -> Result<(), StoreError>;
    fn iter_balances(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError>;

    /// The full, ordered grant list of one account, encoded as a single record.
    fn put_grants(&self, account: &AccountAddress, record: &[u8]) -> Result<(), StoreError>;
    fn iter_grants(&self) -> Result<Vec<(AccountAddress, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Drop every balance, grant and metadata record.
    fn clear(&self) -> Result<(), StoreError>;
}

//! Ledger snapshots: the state of every account at one instant.

use serde::{Deserialize, Serialize};
use vesta_types::{AccountAddress, Timestamp, TokenAmount};
use vesta_vesting::Grant;

/// Point-in-time view of the whole ledger, accounts sorted by address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// The instant at which locked/free amounts were evaluated.
    pub taken_at: Timestamp,
    pub issuer: AccountAddress,
    pub initial_supply: TokenAmount,
    pub total_supply: TokenAmount,
    pub total_burned: TokenAmount,
    pub accounts: Vec<AccountSnapshot>,
}

/// The state of a single account captured in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub address: AccountAddress,
    /// Nominal balance, locked tokens included.
    pub balance: TokenAmount,
    /// Portion of `balance` spendable at `taken_at`.
    pub free: TokenAmount,
    /// Sum of the account's grants still locked at `taken_at`.
    pub locked: TokenAmount,
    /// Grants in creation order; empty for accounts that never vested.
    pub grants: Vec<Grant>,
}

impl LedgerSnapshot {
    pub fn account(&self, address: &AccountAddress) -> Option<&AccountSnapshot> {
        self.accounts
            .binary_search_by(|a| a.address.cmp(address))
            .ok()
            .map(|i| &self.accounts[i])
    }

    /// Sum of all captured balances; equals `total_supply` for a consistent ledger.
    pub fn balance_sum(&self) -> TokenAmount {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}

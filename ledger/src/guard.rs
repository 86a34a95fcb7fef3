//! Transfer guard: the free-balance check in front of every debit.

use crate::balances::BalanceLedger;
use crate::error::LedgerError;
use vesta_types::{AccountAddress, Timestamp, TokenAmount};
use vesta_vesting::GrantLedger;

/// Authorises balance-reducing operations against the unlocked portion only.
///
/// Pure: reads balances and grants, writes nothing. The caller debits after
/// the check passes. Only the spender's grants count; whatever an account
/// receives through plain transfers is free immediately.
pub struct TransferGuard;

impl TransferGuard {
    /// Nominal balance minus whatever is still locked at `now`.
    pub fn free_balance(
        balances: &BalanceLedger,
        grants: &GrantLedger,
        account: &AccountAddress,
        now: Timestamp,
    ) -> Result<(TokenAmount, TokenAmount), LedgerError> {
        let locked = grants.locked_or_zero(account, now)?;
        let free = balances.balance_of(account).saturating_sub(locked);
        Ok((free, locked))
    }

    /// Fail with `InsufficientUnlockedBalance` unless `amount` fits in the free balance.
    pub fn assert_transferable(
        balances: &BalanceLedger,
        grants: &GrantLedger,
        account: &AccountAddress,
        amount: TokenAmount,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        let (free, locked) = Self::free_balance(balances, grants, account, now)?;
        if amount > free {
            return Err(LedgerError::InsufficientUnlockedBalance {
                account: account.clone(),
                needed: amount,
                free,
                locked,
            });
        }
        Ok(())
    }
}

use thiserror::Error;
use vesta_types::{AccountAddress, TokenAmount};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("caller {caller} is not authorised to distribute tokens")]
    Unauthorized { caller: AccountAddress },

    #[error(
        "malformed batch: {recipients} recipients, {amounts} amounts and {kinds} schedule kinds"
    )]
    MalformedBatch {
        recipients: usize,
        amounts: usize,
        kinds: usize,
    },

    #[error("batch entry {index} has a zero amount")]
    InvalidAmount { index: usize },

    #[error("insufficient balance in {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: AccountAddress,
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error(
        "some tokens of {account} are still locked: need {needed}, only {free} unlocked ({locked} locked)"
    )]
    InsufficientUnlockedBalance {
        account: AccountAddress,
        needed: TokenAmount,
        free: TokenAmount,
        locked: TokenAmount,
    },

    #[error("arithmetic overflow in ledger accounting")]
    Overflow,

    #[error("vesting error: {0}")]
    Vesting(#[from] vesta_vesting::VestingError),

    #[error("store error: {0}")]
    Store(#[from] vesta_store::StoreError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),
}

//! End-to-end scenarios through the ledger service:
//! distribution → vesting queries → gated transfers and burns → persistence.
//!
//! All time comes from a shared `NullClock`, with grants created at t = 0
//! under the default terms (private sale 3 + 10 s, investor 5 + 10 s).

use std::sync::Arc;

use vesta_ledger::{LedgerError, LedgerService, TokenLedger};
use vesta_nullables::{NullClock, NullLedgerStore};
use vesta_types::{AccountAddress, TokenAmount};
use vesta_vesting::{ScheduleKind, VestingConfig, VestingError};

use ScheduleKind::{Immediate as I, Investor as Inv, PrivateSale as PS};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn addr(name: &str) -> AccountAddress {
    AccountAddress::new(name)
}

fn tokens(n: u128) -> TokenAmount {
    TokenAmount::from_tokens(n)
}

fn issuer() -> AccountAddress {
    addr("issuer")
}

fn fresh() -> (Arc<NullClock>, LedgerService<Arc<NullClock>>) {
    let clock = Arc::new(NullClock::new(0));
    let ledger = TokenLedger::new(issuer(), tokens(1_000_000), VestingConfig::default());
    (Arc::clone(&clock), LedgerService::new(ledger, clock))
}

fn distribute(
    svc: &LedgerService<Arc<NullClock>>,
    entries: &[(&str, u128, ScheduleKind)],
) -> Result<(), LedgerError> {
    let recipients: Vec<_> = entries.iter().map(|(a, _, _)| addr(a)).collect();
    let amounts: Vec<_> = entries.iter().map(|(_, n, _)| tokens(*n)).collect();
    let kinds: Vec<_> = entries.iter().map(|(_, _, k)| *k).collect();
    svc.distribute(&issuer(), &recipients, &amounts, &kinds)
}

fn assert_no_schedule(result: Result<TokenAmount, LedgerError>) {
    assert!(
        matches!(
            result,
            Err(LedgerError::Vesting(VestingError::NoVestingSchedule(_)))
        ),
        "expected NoVestingSchedule, got {result:?}"
    );
}

fn assert_conserved(svc: &LedgerService<Arc<NullClock>>) {
    let snapshot = svc.snapshot().expect("snapshot");
    assert_eq!(snapshot.balance_sum(), snapshot.total_supply);
    assert_eq!(
        snapshot.total_supply + snapshot.total_burned,
        snapshot.initial_supply
    );
    for account in &snapshot.accounts {
        assert!(account.locked <= account.balance);
    }
}

// ---------------------------------------------------------------------------
// Distribution across the three kinds
// ---------------------------------------------------------------------------

#[test]
fn three_kinds_from_genesis() {
    let (_clock, svc) = fresh();
    distribute(&svc, &[("a", 4, I), ("b", 300, PS), ("c", 30_000, Inv)]).unwrap();

    assert_eq!(svc.balance_of(&issuer()), tokens(969_696));
    assert_eq!(svc.balance_of(&addr("a")), tokens(4));
    assert_eq!(svc.balance_of(&addr("b")), tokens(300));
    assert_eq!(svc.balance_of(&addr("c")), tokens(30_000));

    assert!(!svc.is_on_vesting_schedule(&addr("a")));
    assert!(svc.is_on_vesting_schedule(&addr("b")));
    assert!(svc.is_on_vesting_schedule(&addr("c")));
    assert!(!svc.is_on_vesting_schedule(&addr("untouched")));

    for account in [addr("a"), addr("untouched")] {
        assert_no_schedule(svc.granted_amount(&account));
        assert_no_schedule(svc.locked_amount(&account));
        assert_no_schedule(svc.unlocked_amount(&account));
    }

    assert_eq!(svc.granted_amount(&addr("b")).unwrap(), tokens(300));
    assert_eq!(svc.locked_amount(&addr("c")).unwrap(), tokens(30_000));
    assert_conserved(&svc);
}

#[test]
fn repeated_recipient_accumulates_grants() {
    let (clock, svc) = fresh();
    distribute(
        &svc,
        &[
            ("d", 3, I),
            ("d", 45, PS),
            ("d", 300, Inv),
            ("d", 3, I),
            ("d", 45, PS),
            ("d", 300, Inv),
        ],
    )
    .unwrap();

    let d = addr("d");
    assert_eq!(svc.balance_of(&d), tokens(696));
    assert_eq!(svc.granted_amount(&d).unwrap(), tokens(690));
    assert_eq!(svc.locked_amount(&d).unwrap(), tokens(690));
    assert_eq!(svc.unlocked_amount(&d).unwrap(), TokenAmount::ZERO);
    assert_eq!(svc.grants_of(&d).len(), 4);

    for t in 0..=20u64 {
        clock.set(t);
        let private = t.clamp(3, 13) - 3;
        let investor = t.clamp(5, 15) - 5;
        let expected = tokens(9 * private as u128 + 60 * investor as u128);
        assert_eq!(svc.unlocked_amount(&d).unwrap(), expected, "t = {t}");
        assert_eq!(
            svc.locked_amount(&d).unwrap() + expected,
            tokens(690),
            "t = {t}"
        );
    }
}

#[test]
fn locked_tokens_gate_transfer_and_burn() {
    let (_clock, svc) = fresh();
    distribute(&svc, &[("e", 10, I), ("e", 10, PS)]).unwrap();
    let e = addr("e");
    assert_eq!(svc.locked_amount(&e).unwrap(), tokens(10));

    svc.transfer(&e, &addr("f"), tokens(1)).unwrap();
    assert_eq!(svc.balance_of(&e), tokens(19));
    assert_eq!(svc.balance_of(&addr("f")), tokens(1));

    svc.burn(&e, tokens(1)).unwrap();
    assert_eq!(svc.balance_of(&e), tokens(18));
    assert_eq!(svc.total_supply(), tokens(999_999));
    assert_eq!(svc.total_burned(), tokens(1));

    let err = svc.transfer(&e, &addr("f"), tokens(10)).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientUnlockedBalance { .. }));
    assert!(err.to_string().contains("still locked"));

    let err = svc.burn(&e, tokens(10)).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientUnlockedBalance { .. }));

    assert_eq!(svc.balance_of(&e), tokens(18));
    assert_eq!(svc.free_balance(&e).unwrap(), tokens(8));
    assert_conserved(&svc);
}

#[test]
fn unlock_follows_the_clock() {
    let (clock, svc) = fresh();
    distribute(&svc, &[("g", 100, PS)]).unwrap();
    let g = addr("g");

    clock.set(3);
    assert!(svc.transfer(&g, &issuer(), tokens(1)).is_err());

    clock.set(8);
    assert_eq!(svc.free_balance(&g).unwrap(), tokens(50));
    svc.transfer(&g, &issuer(), tokens(50)).unwrap();
    assert!(svc.transfer(&g, &issuer(), tokens(1)).is_err());

    clock.set(13);
    svc.burn(&g, tokens(50)).unwrap();
    assert_eq!(svc.balance_of(&g), TokenAmount::ZERO);
    // Grants outlive the balance they locked.
    assert_eq!(svc.granted_amount(&g).unwrap(), tokens(100));
    assert_conserved(&svc);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[test]
fn rejected_distributions_change_nothing() {
    let (_clock, svc) = fresh();
    let before = svc.snapshot().unwrap();

    let err = svc
        .distribute(&addr("a"), &[addr("a")], &[tokens(1)], &[I])
        .unwrap_err();
    assert!(matches!(err, LedgerError::Unauthorized { .. }));

    let err = svc
        .distribute(&issuer(), &[addr("a"), addr("b")], &[tokens(1)], &[I, I])
        .unwrap_err();
    assert!(matches!(err, LedgerError::MalformedBatch { .. }));

    let err = svc
        .distribute_tagged(&issuer(), &[addr("a")], &[tokens(1)], &[3])
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Vesting(VestingError::InvalidScheduleKind { tag: 3 })
    ));

    let err = distribute(&svc, &[("a", 1, PS), ("b", 0, Inv)]).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount { index: 1 }));

    let err = distribute(&svc, &[("a", 600_000, PS), ("b", 600_000, I)]).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));

    assert_eq!(svc.snapshot().unwrap(), before);
}

#[test]
fn transfer_beyond_balance_is_insufficient_balance() {
    let (_clock, svc) = fresh();
    distribute(&svc, &[("a", 5, I)]).unwrap();
    let err = svc.transfer(&addr("a"), &addr("b"), tokens(6)).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
    let err = svc.burn(&addr("nobody"), tokens(1)).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn saved_ledger_resumes_vesting() {
    let (clock, svc) = fresh();
    distribute(&svc, &[("h", 20, Inv), ("h", 5, I)]).unwrap();
    clock.set(4);
    svc.burn(&addr("h"), tokens(5)).unwrap();

    let store = NullLedgerStore::new();
    svc.save_to_store(&store).unwrap();

    let restored = TokenLedger::load_from_store(&store).unwrap();
    let clock = Arc::new(NullClock::new(10));
    let svc = LedgerService::new(restored, Arc::clone(&clock));

    assert_eq!(svc.total_supply(), tokens(999_995));
    assert_eq!(svc.total_burned(), tokens(5));
    assert_eq!(svc.locked_amount(&addr("h")).unwrap(), tokens(10));
    svc.transfer(&addr("h"), &addr("i"), tokens(10)).unwrap();
    assert!(svc.transfer(&addr("h"), &addr("i"), tokens(1)).is_err());
    assert_conserved(&svc);
}

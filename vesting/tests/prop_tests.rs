use proptest::prelude::*;

use vesta_types::{AccountAddress, Timestamp, TokenAmount};
use vesta_vesting::{GrantLedger, ScheduleKind, VestingCalculator, VestingConfig};

fn vesting_kind() -> impl Strategy<Value = ScheduleKind> {
    prop_oneof![Just(ScheduleKind::PrivateSale), Just(ScheduleKind::Investor)]
}

proptest! {
    /// Locked amount never increases as time moves forward.
    #[test]
    fn locked_is_non_increasing(
        kind in vesting_kind(),
        raw in 1u128..u128::MAX / 2,
        created in 0u64..1_000,
        t1 in 0u64..2_000,
        dt in 0u64..2_000,
    ) {
        let mut ledger = GrantLedger::default();
        let owner = AccountAddress::new("holder");
        ledger.record_grant(&owner, kind, TokenAmount::new(raw), Timestamp::new(created)).unwrap();
        let l1 = ledger.locked_amount(&owner, Timestamp::new(t1)).unwrap();
        let l2 = ledger.locked_amount(&owner, Timestamp::new(t1 + dt)).unwrap();
        prop_assert!(l2 <= l1, "lock grew from {} to {}", l1, l2);
        prop_assert!(l1 <= TokenAmount::new(raw));
    }

    /// Every grant is fully released at or after its unlock end.
    #[test]
    fn zero_after_full_unlock(
        kind in vesting_kind(),
        raw in 1u128..1_000_000_000_000_000_000_000_000,
        created in 0u64..1_000_000,
        after in 0u64..1_000_000,
    ) {
        let calc = VestingCalculator::default();
        let mut ledger = GrantLedger::default();
        let owner = AccountAddress::new("holder");
        let grant = ledger
            .record_grant(&owner, kind, TokenAmount::new(raw), Timestamp::new(created))
            .unwrap()
            .clone();
        let end = calc.full_unlock_at(&grant);
        prop_assert_eq!(calc.locked_portion(&grant, end.saturating_add(after)), TokenAmount::ZERO);
    }

    /// Private sale: `A` locked through t0+3, `A·(t−t0−3)/10` free inside
    /// the window, everything free from t0+13.
    #[test]
    fn private_sale_cliff_exactness(
        tokens in 1u128..1_000_000,
        t0 in 0u64..1_000_000,
        offset in 0u64..30,
    ) {
        let mut ledger = GrantLedger::default();
        let owner = AccountAddress::new("holder");
        let amount = TokenAmount::from_tokens(tokens);
        ledger.record_grant(&owner, ScheduleKind::PrivateSale, amount, Timestamp::new(t0)).unwrap();
        let now = Timestamp::new(t0 + offset);
        let unlocked = ledger.unlocked_amount(&owner, now).unwrap();
        let expected = if offset <= 3 {
            TokenAmount::ZERO
        } else if offset < 13 {
            TokenAmount::new(amount.raw() * (offset as u128 - 3) / 10)
        } else {
            amount
        };
        prop_assert_eq!(unlocked, expected);
    }

    /// Aggregates over several grants equal the sum of each grant computed alone.
    #[test]
    fn multi_grant_additivity(
        grants in prop::collection::vec((vesting_kind(), 1u128..1_000_000, 0u64..20), 1..12),
        now in 0u64..60,
    ) {
        let calc = VestingCalculator::new(VestingConfig::default());
        let mut ledger = GrantLedger::default();
        let owner = AccountAddress::new("holder");
        let mut expected_locked = TokenAmount::ZERO;
        let mut expected_granted = TokenAmount::ZERO;
        for (kind, tokens, created) in grants {
            let grant = ledger
                .record_grant(&owner, kind, TokenAmount::from_tokens(tokens), Timestamp::new(created))
                .unwrap()
                .clone();
            expected_locked = expected_locked + calc.locked_portion(&grant, Timestamp::new(now));
            expected_granted = expected_granted + grant.amount;
        }
        let now = Timestamp::new(now);
        prop_assert_eq!(ledger.granted_amount(&owner).unwrap(), expected_granted);
        prop_assert_eq!(ledger.locked_amount(&owner, now).unwrap(), expected_locked);
        prop_assert_eq!(
            ledger.unlocked_amount(&owner, now).unwrap(),
            expected_granted - expected_locked
        );
    }

    /// Scaling the terms by a unit scales the unlock instants by the same unit.
    #[test]
    fn scaled_terms_preserve_shape(unit in 1u64..10_000, step in 0u64..20) {
        let scaled = VestingCalculator::new(VestingConfig::scaled(unit));
        let reference = VestingCalculator::default();
        let grant = vesta_vesting::Grant {
            owner: AccountAddress::new("holder"),
            kind: ScheduleKind::Investor,
            amount: TokenAmount::from_tokens(1_000),
            created_at: Timestamp::EPOCH,
        };
        prop_assert_eq!(
            scaled.locked_portion(&grant, Timestamp::new(step * unit)),
            reference.locked_portion(&grant, Timestamp::new(step))
        );
    }
}

//! Property-based tests for timetable math and claim accounting.

use proptest::prelude::*;

use tenure_access::RoleRegistry;
use tenure_token::{InMemoryLedger, TokenLedger};
use tenure_types::{AccountAddress, Timestamp, TokenAmount, MONTH_SECS};
use tenure_vesting::{Cliff, CliffTimetable, VestingSchedule};

fn test_address(n: u8) -> AccountAddress {
    AccountAddress::new(format!("tnr_{:0>40}", n))
}

fn months(n: u64) -> Timestamp {
    Timestamp::new(n * MONTH_SECS)
}

/// Build a valid timetable from percent split points: the diffs of
/// `[0, splits.., 100]` always sum to exactly 100.
fn timetable_from_splits(splits: &std::collections::BTreeSet<u8>, gap_months: u64) -> CliffTimetable {
    let mut bounds: Vec<u8> = vec![0];
    bounds.extend(splits.iter().copied());
    bounds.push(100);
    let cliffs: Vec<Cliff> = bounds
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Cliff {
            offset_secs: index as u64 * gap_months * MONTH_SECS,
            percent: pair[1] - pair[0],
        })
        .collect();
    CliffTimetable::new(cliffs).unwrap()
}

proptest! {
    /// The per-cliff rows always sum to exactly the allocation, whatever
    /// the percents and total; the last row absorbs all rounding.
    #[test]
    fn rows_sum_to_total(
        splits in proptest::collection::btree_set(1u8..100, 0..5),
        gap_months in 1u64..6,
        total_raw in 0u128..1_000_000_000_000,
    ) {
        let timetable = timetable_from_splits(&splits, gap_months);
        let total = TokenAmount::new(total_raw);
        let rows = timetable.rows(Timestamp::EPOCH, total).unwrap();

        prop_assert_eq!(rows.len(), timetable.len());
        let sum: u128 = rows.iter().map(|row| row.amount.raw()).sum();
        prop_assert_eq!(sum, total_raw);
    }

    /// The cumulative unlocked percent never decreases with time, is zero
    /// before the first cliff, and reaches 100 at the last one.
    #[test]
    fn unlocked_percent_is_monotone(
        splits in proptest::collection::btree_set(1u8..100, 0..5),
        gap_months in 1u64..6,
        probes in proptest::collection::vec(0u64..60, 2..10),
    ) {
        let timetable = timetable_from_splits(&splits, gap_months);
        let start = months(1);

        let mut sorted = probes;
        sorted.sort_unstable();
        let mut last = 0u8;
        for month in sorted {
            let percent = timetable.unlocked_percent(start, months(month));
            prop_assert!(percent >= last);
            prop_assert!(percent <= 100);
            last = percent;
        }

        prop_assert_eq!(timetable.unlocked_percent(start, Timestamp::EPOCH), 0);
        let span = timetable.len() as u64 * gap_months;
        prop_assert_eq!(timetable.unlocked_percent(start, months(1 + span)), 100);
    }

    /// Claiming everything available at random times never overdraws the
    /// allocation, and a final claim after the last cliff settles it
    /// exactly. The vault holds only the allocation, so any overdraw would
    /// surface as a transfer failure.
    #[test]
    fn claims_settle_to_allocation(
        claim_months in proptest::collection::vec(0u64..30, 0..8),
        total_tokens in 1u128..100_000,
    ) {
        let owner = test_address(1);
        let beneficiary = test_address(2);
        let vault = test_address(100);
        let total = TokenAmount::from_tokens(total_tokens);

        let mut schedule = VestingSchedule::new(CliffTimetable::pre_exchange(), vault.clone());
        let registry = RoleRegistry::with_owner(owner.clone());
        schedule.init(&registry, &owner, months(0)).unwrap();
        schedule
            .add_user(&registry, &owner, beneficiary.clone(), total)
            .unwrap();

        let mut ledger = InMemoryLedger::new();
        ledger.mint(&vault, total).unwrap();

        let mut sorted = claim_months;
        sorted.sort_unstable();
        sorted.push(20);
        for month in sorted {
            let claimable = schedule.claimable(&beneficiary, months(month)).unwrap();
            if claimable.is_zero() {
                continue;
            }
            schedule
                .claim_tokens(&mut ledger, &beneficiary, &beneficiary, claimable, months(month))
                .unwrap();
            let entry = schedule.entry(&beneficiary).unwrap();
            prop_assert!(entry.claimed <= entry.total);
        }

        let entry = schedule.entry(&beneficiary).unwrap();
        prop_assert_eq!(entry.claimed, total);
        prop_assert_eq!(ledger.balance_of(&beneficiary), total);
        prop_assert_eq!(ledger.balance_of(&vault), TokenAmount::ZERO);
        prop_assert_eq!(schedule.required_reserve().unwrap(), TokenAmount::ZERO);
    }
}

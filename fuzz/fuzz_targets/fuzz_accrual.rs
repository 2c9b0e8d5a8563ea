#![no_main]

use libfuzzer_sys::fuzz_target;

use tenure_staking::{SchemeTerms, Stake};
use tenure_types::{AccessTier, AccountAddress, LicenseKind, LocationId, Timestamp, TokenAmount};

// Fuzz yield accrual with arbitrary terms, unit lengths, and timestamps.
// Ensures the computation never panics regardless of input, and that an
// unlocked amount never exceeds the entitlement when both are defined.
fuzz_target!(|data: &[u8]| {
    if data.len() < 58 {
        return;
    }

    let required_stake = u128::from_le_bytes(data[0..16].try_into().unwrap());
    let claimed = u128::from_le_bytes(data[16..32].try_into().unwrap());
    let duration_secs = u64::from_le_bytes(data[32..40].try_into().unwrap());
    let unit_secs = u64::from_le_bytes(data[40..48].try_into().unwrap());
    let opened_at = u64::from_le_bytes(data[48..56].try_into().unwrap());
    let yield_rate_percent = data[56];
    let query_offset = data[57] as u64;

    let stake = Stake {
        id: 1,
        owner: AccountAddress::new("tnr_fuzz"),
        scheme_id: 0,
        terms: SchemeTerms {
            license_kind: LicenseKind::Location,
            required_tier: AccessTier::Standard,
            duration_secs,
            required_stake: TokenAmount::new(required_stake),
            yield_rate_percent,
        },
        opened_at: Timestamp::new(opened_at),
        location_id: LocationId::ZERO,
        domain_name: String::new(),
        claimed: TokenAmount::new(claimed),
        canceled: false,
        penalty_percent: None,
    };

    let now = Timestamp::new(opened_at.saturating_add(query_offset.saturating_mul(duration_secs / 64)));

    // These must never panic.
    let unlocked = stake.unlocked_at(unit_secs, now);
    let _ = stake.claimable_at(unit_secs, now);
    let _ = stake.remaining_entitlement();
    let _ = stake.remaining_principal();

    if let (Some(unlocked), Some(entitlement)) = (unlocked, stake.entitlement()) {
        assert!(unlocked <= entitlement);
    }
});

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Attempt to restore arbitrary bytes as persisted engine state.
    // The goal is to ensure deserialization never panics on malformed input.

    // Try restoring as a full staking engine snapshot
    let _ = tenure_staking::StakingEngine::restore(data);

    // Try restoring as a vesting schedule snapshot
    let _ = tenure_vesting::VestingSchedule::restore(data);

    // Try deserializing the individual record types
    let _ = bincode::deserialize::<tenure_staking::Stake>(data);
    let _ = bincode::deserialize::<tenure_staking::SchemeTerms>(data);
    let _ = bincode::deserialize::<tenure_types::Signature>(data);
    let _ = bincode::deserialize::<tenure_types::TokenAmount>(data);
});

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tenure_types::{Timestamp, TokenAmount};
use tenure_vesting::{Cliff, CliffTimetable};

#[derive(Arbitrary, Debug)]
struct TimetableInput {
    splits: Vec<u8>,
    gap_secs: u32,
    total_raw: u128,
    start_secs: u64,
    query_offset: u32,
}

// Fuzz timetable construction and the release projection. A timetable built
// from any percent partition must project rows that sum exactly to the
// allocation, and the cumulative percent must stay within 0..=100.
fuzz_target!(|input: TimetableInput| {
    // Interior split points of the 0..100 percent range. Consecutive
    // differences always sum to exactly 100.
    let mut splits: Vec<u8> = input
        .splits
        .iter()
        .map(|s| s % 100)
        .filter(|&s| s > 0)
        .collect();
    splits.sort_unstable();
    splits.dedup();

    let gap = u64::from(input.gap_secs).max(1);
    let mut cliffs = Vec::with_capacity(splits.len() + 1);
    let mut previous = 0u8;
    for (index, &split) in splits.iter().enumerate() {
        cliffs.push(Cliff {
            offset_secs: index as u64 * gap,
            percent: split - previous,
        });
        previous = split;
    }
    cliffs.push(Cliff {
        offset_secs: splits.len() as u64 * gap,
        percent: 100 - previous,
    });

    let timetable = match CliffTimetable::new(cliffs) {
        Ok(timetable) => timetable,
        Err(_) => return,
    };

    let start = Timestamp::new(input.start_secs);
    let now = start.saturating_add_secs(u64::from(input.query_offset));
    let percent = timetable.unlocked_percent(start, now);
    assert!(percent <= 100);

    if let Some(rows) = timetable.rows(start, TokenAmount::new(input.total_raw)) {
        let projected: u128 = rows.iter().map(|row| row.amount.raw()).sum();
        assert_eq!(projected, input.total_raw);
    }
});

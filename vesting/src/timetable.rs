//! Cliff timetables.
//!
//! A timetable is a validated list of (offset, percent) cliffs. Percents sum
//! to exactly 100 and offsets strictly increase, so the cumulative unlocked
//! percent is monotone and reaches 100 at the final cliff.

use serde::{Deserialize, Serialize};

use tenure_types::{Timestamp, TokenAmount, MONTH_SECS};

use crate::error::VestingError;

/// One unlock step: `percent` of the total becomes available `offset_secs`
/// after the schedule start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cliff {
    pub offset_secs: u64,
    pub percent: u8,
}

/// One row of a beneficiary's individual projection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingRow {
    pub unlock_at: Timestamp,
    pub amount: TokenAmount,
}

/// A validated cliff sequence shared by every beneficiary of a schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliffTimetable {
    cliffs: Vec<Cliff>,
}

impl CliffTimetable {
    pub fn new(cliffs: Vec<Cliff>) -> Result<Self, VestingError> {
        if cliffs.is_empty() {
            return Err(VestingError::InvalidTimetable(
                "timetable needs at least one cliff".to_string(),
            ));
        }
        for pair in cliffs.windows(2) {
            if pair[1].offset_secs <= pair[0].offset_secs {
                return Err(VestingError::InvalidTimetable(format!(
                    "offsets must strictly increase, saw {} then {}",
                    pair[0].offset_secs, pair[1].offset_secs
                )));
            }
        }
        let sum: u32 = cliffs.iter().map(|cliff| cliff.percent as u32).sum();
        if sum != 100 {
            return Err(VestingError::InvalidTimetable(format!(
                "percents sum to {sum}, expected 100"
            )));
        }
        Ok(Self { cliffs })
    }

    /// Pre-exchange distribution: first cliff immediately at start, then
    /// every 4 months over 20 months.
    pub fn pre_exchange() -> Self {
        Self::from_months(&[(0, 10), (4, 18), (8, 18), (12, 18), (16, 18), (20, 18)])
    }

    /// Team and advisors distribution: one-year lockup, then roughly every
    /// 5 to 7 months out to month 41.
    pub fn team_and_advisors() -> Self {
        Self::from_months(&[(12, 20), (17, 16), (24, 16), (29, 16), (36, 16), (41, 16)])
    }

    fn from_months(steps: &[(u64, u8)]) -> Self {
        let cliffs = steps
            .iter()
            .map(|&(month, percent)| Cliff {
                offset_secs: month * MONTH_SECS,
                percent,
            })
            .collect();
        Self::new(cliffs).expect("preset timetable is valid")
    }

    pub fn cliffs(&self) -> &[Cliff] {
        &self.cliffs
    }

    pub fn len(&self) -> usize {
        self.cliffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cliffs.is_empty()
    }

    /// Cumulative percent unlocked at `now` for a schedule started at
    /// `start`.
    pub fn unlocked_percent(&self, start: Timestamp, now: Timestamp) -> u8 {
        self.cliffs
            .iter()
            .filter(|cliff| start.saturating_add_secs(cliff.offset_secs) <= now)
            .map(|cliff| cliff.percent as u32)
            .sum::<u32>() as u8
    }

    /// Per-cliff projection of `total` for a schedule started at `start`.
    ///
    /// Every row but the last is `total * percent / 100` floored; the last
    /// row takes the remainder so the rows sum to exactly `total`. Claims
    /// compute from the cumulative percent, this projection is the
    /// beneficiary-facing view.
    pub fn rows(&self, start: Timestamp, total: TokenAmount) -> Option<Vec<VestingRow>> {
        let mut rows = Vec::with_capacity(self.cliffs.len());
        let mut allotted = 0u128;
        for (index, cliff) in self.cliffs.iter().enumerate() {
            let amount = if index + 1 == self.cliffs.len() {
                total.raw().checked_sub(allotted)?
            } else {
                total.raw().checked_mul(cliff.percent as u128)? / 100
            };
            allotted = allotted.checked_add(amount)?;
            rows.push(VestingRow {
                unlock_at: start.saturating_add_secs(cliff.offset_secs),
                amount: TokenAmount::new(amount),
            });
        }
        Some(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(steps: &[(u64, u8)]) -> Result<CliffTimetable, VestingError> {
        CliffTimetable::new(
            steps
                .iter()
                .map(|&(month, percent)| Cliff {
                    offset_secs: month * MONTH_SECS,
                    percent,
                })
                .collect(),
        )
    }

    #[test]
    fn presets_validate_and_span_100_percent() {
        for timetable in [
            CliffTimetable::pre_exchange(),
            CliffTimetable::team_and_advisors(),
        ] {
            assert_eq!(timetable.len(), 6);
            let sum: u32 = timetable.cliffs().iter().map(|c| c.percent as u32).sum();
            assert_eq!(sum, 100);
        }
    }

    #[test]
    fn rejects_empty_timetable() {
        match CliffTimetable::new(Vec::new()).unwrap_err() {
            VestingError::InvalidTimetable(msg) => assert!(msg.contains("at least one")),
            other => panic!("expected InvalidTimetable, got {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_percent_sum() {
        match table(&[(0, 50), (4, 49)]).unwrap_err() {
            VestingError::InvalidTimetable(msg) => assert!(msg.contains("99")),
            other => panic!("expected InvalidTimetable, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_increasing_offsets() {
        match table(&[(4, 50), (4, 50)]).unwrap_err() {
            VestingError::InvalidTimetable(msg) => assert!(msg.contains("strictly increase")),
            other => panic!("expected InvalidTimetable, got {other:?}"),
        }
    }

    #[test]
    fn unlocked_percent_steps_at_each_cliff() {
        let timetable = CliffTimetable::pre_exchange();
        let start = Timestamp::new(1_000);
        let at = |month: u64| Timestamp::new(1_000 + month * MONTH_SECS);

        assert_eq!(timetable.unlocked_percent(start, Timestamp::EPOCH), 0);
        assert_eq!(timetable.unlocked_percent(start, at(0)), 10);
        assert_eq!(timetable.unlocked_percent(start, at(1)), 10);
        assert_eq!(timetable.unlocked_percent(start, at(4)), 28);
        assert_eq!(timetable.unlocked_percent(start, at(19)), 82);
        assert_eq!(timetable.unlocked_percent(start, at(20)), 100);
        assert_eq!(timetable.unlocked_percent(start, at(500)), 100);
    }

    #[test]
    fn rows_sum_exactly_to_total() {
        let timetable = CliffTimetable::pre_exchange();
        // 1003 does not divide evenly; the last row absorbs the dust.
        let total = TokenAmount::new(1_003);
        let rows = timetable.rows(Timestamp::EPOCH, total).unwrap();

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].amount, TokenAmount::new(100));
        for row in &rows[1..5] {
            assert_eq!(row.amount, TokenAmount::new(180));
        }
        assert_eq!(rows[5].amount, TokenAmount::new(183));

        let sum: u128 = rows.iter().map(|row| row.amount.raw()).sum();
        assert_eq!(sum, total.raw());
    }

    #[test]
    fn rows_carry_absolute_unlock_times() {
        let timetable = CliffTimetable::team_and_advisors();
        let start = Timestamp::new(5_000);
        let rows = timetable.rows(start, TokenAmount::new(100)).unwrap();
        assert_eq!(rows[0].unlock_at, Timestamp::new(5_000 + 12 * MONTH_SECS));
        assert_eq!(rows[5].unlock_at, Timestamp::new(5_000 + 41 * MONTH_SECS));
    }
}

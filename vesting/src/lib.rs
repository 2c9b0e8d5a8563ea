//! Cliff-based token vesting: validated timetables, per-beneficiary
//! allocations, claim accounting against an external token vault.
//!
//! A [`VestingSchedule`] is a deterministic state machine like its staking
//! sibling; the ledger, role registry, and clock are supplied per call.

pub mod error;
pub mod schedule;
pub mod timetable;

pub use error::VestingError;
pub use schedule::{VestingEntry, VestingSchedule};
pub use timetable::{Cliff, CliffTimetable, VestingRow};

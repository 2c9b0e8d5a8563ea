use thiserror::Error;

use tenure_access::AccessError;
use tenure_token::TokenError;
use tenure_types::AccountAddress;

/// Errors produced by a vesting schedule.
#[derive(Debug, Error)]
pub enum VestingError {
    /// Caller lacks the role or delegation an operation is gated on.
    #[error("{0}")]
    Unauthorized(#[from] AccessError),

    /// Caller tried to claim another account's entry.
    #[error("vesting entry belongs to {expected}, not {actual}")]
    NotBeneficiary {
        expected: AccountAddress,
        actual: AccountAddress,
    },

    /// The schedule start was already set.
    #[error("schedule already initialized")]
    AlreadyInitialized,

    /// Operation needs a schedule start that has not been set yet.
    #[error("schedule not initialized")]
    NotInitialized,

    #[error("{0} is already registered for vesting")]
    AlreadyRegistered(AccountAddress),

    #[error("{0} has no vesting entry")]
    BeneficiaryNotFound(AccountAddress),

    /// Claim amount fell outside `0 < amount <= claimable`.
    #[error("requested {requested} exceeds claimable {claimable}")]
    ExceedsClaimable { requested: u128, claimable: u128 },

    /// Timetable failed validation.
    #[error("invalid timetable: {0}")]
    InvalidTimetable(String),

    #[error("arithmetic overflow in vesting computation")]
    Overflow,

    /// Schedule snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(String),

    /// Token movement against the ledger failed.
    #[error("{0}")]
    Token(#[from] TokenError),
}

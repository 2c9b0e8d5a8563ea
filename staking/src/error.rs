use thiserror::Error;

use tenure_access::AccessError;
use tenure_token::TokenError;
use tenure_types::AccountAddress;

use crate::scheme::SchemeId;
use crate::stake::StakeId;

/// Errors produced by the staking engine.
#[derive(Debug, Error)]
pub enum StakingError {
    /// Caller lacks the role an operation is gated on.
    #[error("{0}")]
    Unauthorized(#[from] AccessError),

    /// Caller is not the owner of the stake it tried to operate on.
    #[error("stake {stake} belongs to {expected}, not {actual}")]
    NotOwner {
        stake: StakeId,
        expected: AccountAddress,
        actual: AccountAddress,
    },

    /// Admission co-signature did not verify against the trusted signer,
    /// or was produced for a different nonce.
    #[error("admission signature rejected")]
    InvalidSignature,

    /// Scheme terms failed validation.
    #[error("invalid scheme terms: {0}")]
    InvalidTerms(String),

    /// No live scheme under this id. Removed schemes report the same.
    #[error("scheme {0} not found")]
    SchemeNotFound(SchemeId),

    #[error("stake {0} not found")]
    StakeNotFound(StakeId),

    /// The stake was canceled and accepts no further operations.
    #[error("stake {0} has been canceled")]
    AlreadyCanceled(StakeId),

    /// Claim attempted while the accrued, unclaimed amount is zero.
    #[error("stake {0} has nothing to claim")]
    NothingToClaim(StakeId),

    /// Explicit claim amount fell outside `0 < amount <= claimable`.
    #[error("requested {requested} exceeds claimable {claimable}")]
    ExceedsClaimable { requested: u128, claimable: u128 },

    #[error("arithmetic overflow in accrual computation")]
    Overflow,

    /// Engine snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Snapshot(String),

    /// Token movement against the ledger failed.
    #[error("{0}")]
    Token(#[from] TokenError),
}

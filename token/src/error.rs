use thiserror::Error;

/// Errors surfaced by a token ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, approved {approved}")]
    InsufficientAllowance { needed: u128, approved: u128 },

    #[error("balance arithmetic overflow")]
    Overflow,
}

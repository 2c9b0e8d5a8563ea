//! Reputation staking: a catalogue of staking schemes, signature-gated
//! admission, per-unit yield accrual, and moderated cancellation.
//!
//! The engine is a deterministic state machine. It owns stakes and nonces,
//! but tokens live in a [`tenure_token::TokenLedger`] and roles in a
//! [`tenure_access::AccessRegistry`], both supplied per call.

pub mod admission;
pub mod engine;
pub mod error;
pub mod params;
pub mod scheme;
pub mod stake;

pub use admission::{admission_digest, sign_admission, verify_admission, ADMISSION_TAG};
pub use engine::StakingEngine;
pub use error::StakingError;
pub use params::{PenaltyBasis, StakingParams};
pub use scheme::{SchemeId, SchemeRegistry, SchemeTerms, StakingScheme};
pub use stake::{Stake, StakeId};

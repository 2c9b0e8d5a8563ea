//! Fundamental types for the tenure accounting engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, token amounts, timestamps, location identifiers, roles, and
//! cryptographic key material.

pub mod address;
pub mod amount;
pub mod keys;
pub mod location;
pub mod role;
pub mod time;

pub use address::AccountAddress;
pub use amount::{TokenAmount, TOKEN_UNIT};
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use location::LocationId;
pub use role::{AccessTier, LicenseKind, Role};
pub use time::{Timestamp, MONTH_SECS};

//! Cryptographic primitives for the tenure engine.
//!
//! - **Ed25519** for the admission co-signature (sign and verify)
//! - **Blake2b** for the canonical admission digest
//!
//! The engine itself only verifies; signing lives here so that tests and the
//! off-line admission service can produce valid co-signatures.

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};

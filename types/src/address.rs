//! Account address type with `tnr_` prefix.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tenure account address, always prefixed with `tnr_`.
///
/// Derived from the account's public key via Blake2b hashing, or supplied
/// directly for accounts whose keys the engine never sees (vaults, external
/// token holders).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// The standard prefix for all tenure account addresses.
    pub const PREFIX: &'static str = "tnr_";

    /// Create a new account address from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `tnr_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "address must start with tnr_");
        Self(s)
    }

    /// Create an account address from a public key.
    ///
    /// The address body is the first 20 bytes of the Blake2b-256 digest of the
    /// key, hex encoded.
    pub fn from_public_key(public_key: &crate::keys::PublicKey) -> Self {
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(public_key.as_bytes());
        let digest = hasher.finalize();
        let mut s = String::with_capacity(Self::PREFIX.len() + 40);
        s.push_str(Self::PREFIX);
        for byte in &digest[..20] {
            s.push_str(&format!("{byte:02x}"));
        }
        Self(s)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this address is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccountAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

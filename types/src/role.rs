//! Role and tier enums for access control and scheme gating.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A privileged role recognized by the access registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Deployment owner. Configures vaults, signers, and vesting schedules.
    Owner,
    /// Scheme curator. Manages the scheme catalogue and cancels stakes.
    Moderator,
}

impl Role {
    /// Whether this role may manage the staking scheme catalogue.
    pub fn manages_schemes(&self) -> bool {
        matches!(self, Self::Moderator)
    }

    /// Whether this role may change engine-level configuration
    /// (vault accounts, trusted signer, trusted worker).
    pub fn configures_engine(&self) -> bool {
        matches!(self, Self::Owner)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Owner => "owner",
            Self::Moderator => "moderator",
        };
        write!(f, "{label}")
    }
}

/// The access tier a staking scheme is sold under.
///
/// The engine stores the tier as catalogue data; eligibility is vouched for by
/// the trusted signer at admission time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessTier {
    /// Open to any admitted staker.
    None,
    Standard,
    Special,
    Ambassador,
}

impl AccessTier {
    /// Whether holding this tier satisfies a scheme that requires `required`.
    pub fn satisfies(&self, required: AccessTier) -> bool {
        *self >= required
    }
}

/// The kind of license a staking scheme grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseKind {
    /// Covers a single physical venue.
    Location,
    /// Covers a web domain.
    Domain,
    /// Covers a venue and its domain together.
    Combined,
}

//! Role registry — grant, revoke, and query privileged roles.

use std::collections::{HashMap, HashSet};

use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use tenure_types::{AccountAddress, Role};

/// Read-side view the engines authorize against.
pub trait AccessRegistry {
    fn has_role(&self, role: Role, account: &AccountAddress) -> bool;
}

/// The single authorization gate for privileged operations.
pub fn require_role(
    registry: &dyn AccessRegistry,
    role: Role,
    account: &AccountAddress,
) -> Result<(), AccessError> {
    if registry.has_role(role, account) {
        Ok(())
    } else {
        Err(AccessError::Unauthorized {
            role,
            account: account.clone(),
        })
    }
}

/// In-memory registry of role grants.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoleRegistry {
    grants: HashMap<Role, HashSet<AccountAddress>>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry bootstrapped with a single owner who also moderates.
    pub fn with_owner(owner: AccountAddress) -> Self {
        let mut registry = Self::new();
        registry.grant(Role::Owner, owner.clone());
        registry.grant(Role::Moderator, owner);
        registry
    }

    /// Grant `role` to `account`. Granting twice is a no-op.
    pub fn grant(&mut self, role: Role, account: AccountAddress) {
        self.grants.entry(role).or_default().insert(account);
    }

    /// Revoke `role` from `account`. Returns whether a grant was removed.
    pub fn revoke(&mut self, role: Role, account: &AccountAddress) -> bool {
        self.grants
            .get_mut(&role)
            .map(|set| set.remove(account))
            .unwrap_or(false)
    }

    /// All accounts holding `role`, in no particular order.
    pub fn accounts_with(&self, role: Role) -> Vec<&AccountAddress> {
        self.grants
            .get(&role)
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }
}

impl AccessRegistry for RoleRegistry {
    fn has_role(&self, role: Role, account: &AccountAddress) -> bool {
        self.grants
            .get(&role)
            .map(|set| set.contains(account))
            .unwrap_or(false)
    }
}

use tenure_types::{AccountAddress, Role};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("account {account} lacks the {role} role")]
    Unauthorized {
        role: Role,
        account: AccountAddress,
    },
}

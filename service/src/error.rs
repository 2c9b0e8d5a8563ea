use thiserror::Error;

use tenure_staking::StakingError;
use tenure_vesting::VestingError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("staking error: {0}")]
    Staking(#[from] StakingError),

    #[error("vesting error: {0}")]
    Vesting(#[from] VestingError),

    #[error("config error: {0}")]
    Config(String),
}

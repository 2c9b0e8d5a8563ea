use serde::{Deserialize, Serialize};

use tenure_types::MONTH_SECS;

/// Which outstanding amount a cancellation penalty is computed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyBasis {
    /// Principal plus unpaid yield at the moment of cancellation.
    #[default]
    RemainingEntitlement,
    /// Unreturned principal only. Yield already paid out is not clawed back.
    RemainingPrincipal,
}

/// Engine-level accounting parameters.
///
/// Fixed per deployment. Scheme terms are snapshotted into each stake, but
/// these parameters apply live to every accrual computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingParams {
    /// Length of one accrual unit in seconds. Yield releases once per full
    /// unit elapsed since admission.
    pub accrual_unit_secs: u64,
    /// Upper bound accepted for a scheme's yield rate percent.
    pub max_yield_rate_percent: u8,
    /// Basis the cancellation penalty is computed on.
    pub penalty_basis: PenaltyBasis,
}

impl StakingParams {
    /// Standard deployment parameters: monthly accrual, 200% yield ceiling,
    /// penalties on the remaining entitlement.
    pub fn standard() -> Self {
        Self {
            accrual_unit_secs: MONTH_SECS,
            max_yield_rate_percent: 200,
            penalty_basis: PenaltyBasis::RemainingEntitlement,
        }
    }
}

impl Default for StakingParams {
    fn default() -> Self {
        Self::standard()
    }
}

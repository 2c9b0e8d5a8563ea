//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};

use tenure_staking::{PenaltyBasis, StakingParams};
use tenure_types::{AccountAddress, PublicKey, MONTH_SECS};

use crate::ServiceError;

/// Configuration for a tenure accounting service.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Custody account that holds staked principal and vesting reserves.
    #[serde(default = "default_vault")]
    pub vault: String,

    /// Account that receives cancellation penalties.
    #[serde(default = "default_penalty_vault")]
    pub penalty_vault: String,

    /// Hex-encoded Ed25519 public key of the admission co-signer.
    ///
    /// Empty by default; a deployment must set this before any stake can be
    /// admitted.
    #[serde(default)]
    pub trusted_signer: String,

    /// Length of one yield accrual unit in seconds.
    #[serde(default = "default_accrual_unit_secs")]
    pub accrual_unit_secs: u64,

    /// Upper bound accepted for a scheme's yield rate percent.
    #[serde(default = "default_max_yield_rate_percent")]
    pub max_yield_rate_percent: u8,

    /// Basis the cancellation penalty is computed on.
    #[serde(default)]
    pub penalty_basis: PenaltyBasis,

    /// Whether to preload the standard scheme catalogue on start-up.
    #[serde(default = "default_true")]
    pub standard_catalogue: bool,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_vault() -> String {
    "tnr_custody_vault".to_string()
}

fn default_penalty_vault() -> String {
    "tnr_penalty_vault".to_string()
}

fn default_accrual_unit_secs() -> u64 {
    MONTH_SECS
}

fn default_max_yield_rate_percent() -> u8 {
    200
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ServiceConfig is always serializable to TOML")
    }

    /// The custody vault as a validated account address.
    pub fn vault_address(&self) -> Result<AccountAddress, ServiceError> {
        parse_address("vault", &self.vault)
    }

    /// The penalty vault as a validated account address.
    pub fn penalty_vault_address(&self) -> Result<AccountAddress, ServiceError> {
        parse_address("penalty_vault", &self.penalty_vault)
    }

    /// Decode the trusted signer's public key from its hex representation.
    pub fn trusted_signer_key(&self) -> Result<PublicKey, ServiceError> {
        let bytes = hex::decode(&self.trusted_signer)
            .map_err(|e| ServiceError::Config(format!("trusted_signer is not valid hex: {e}")))?;
        let key: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            ServiceError::Config(format!(
                "trusted_signer must encode 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(PublicKey(key))
    }

    /// Staking engine parameters assembled from this configuration.
    pub fn staking_params(&self) -> StakingParams {
        StakingParams {
            accrual_unit_secs: self.accrual_unit_secs,
            max_yield_rate_percent: self.max_yield_rate_percent,
            penalty_basis: self.penalty_basis,
        }
    }
}

fn parse_address(field: &str, raw: &str) -> Result<AccountAddress, ServiceError> {
    if !raw.starts_with(AccountAddress::PREFIX) || raw.len() == AccountAddress::PREFIX.len() {
        return Err(ServiceError::Config(format!(
            "{field} must be a tnr_-prefixed account address, got {raw:?}"
        )));
    }
    Ok(AccountAddress::new(raw))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            vault: default_vault(),
            penalty_vault: default_penalty_vault(),
            trusted_signer: String::new(),
            accrual_unit_secs: default_accrual_unit_secs(),
            max_yield_rate_percent: default_max_yield_rate_percent(),
            penalty_basis: PenaltyBasis::default(),
            standard_catalogue: default_true(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

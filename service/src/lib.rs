//! Tenure accounting service — orchestrates the staking and vesting engines.
//!
//! The service is the embedding surface that:
//! - Assembles the engines from a TOML configuration
//! - Routes staking admissions, claims, and cancellations
//! - Routes vesting registration and claims for both pools
//! - Emits structured logs for every state-changing operation

pub mod config;
pub mod error;
pub mod logging;
pub mod service;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use logging::{init_logging, LogFormat};
pub use service::{AccountingService, VestingPool};

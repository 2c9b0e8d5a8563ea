//! Role registry and authorization gate.
//!
//! Privileged engine operations are guarded by exactly one check:
//! [`require_role`] against an [`AccessRegistry`]. The engines never look at
//! role membership directly, so an embedding can substitute its own registry
//! without touching accounting code.

pub mod error;
pub mod registry;

pub use error::AccessError;
pub use registry::{require_role, AccessRegistry, RoleRegistry};

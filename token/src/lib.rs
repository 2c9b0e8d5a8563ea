//! Fungible token ledger seam for the tenure engine.
//!
//! The staking and vesting engines move balances they do not own. They call
//! through the [`TokenLedger`] trait and never implement token policy
//! themselves. Production embeddings adapt their own ledger; tests and simple
//! embeddings use [`InMemoryLedger`].

pub mod error;
pub mod ledger;
pub mod memory;

pub use error::TokenError;
pub use ledger::TokenLedger;
pub use memory::InMemoryLedger;

//! # Adapters Layer
//!
//! In-memory host collaborators. Embedders plug in their own ledger; tests
//! and local tooling use these.

pub mod bank;
pub mod ibc;
pub mod router;

pub use bank::{BankSnapshot, InMemoryBank};
pub use ibc::{InMemoryCapabilityKeeper, InMemoryChannelKeeper};
pub use router::MsgServiceRouter;

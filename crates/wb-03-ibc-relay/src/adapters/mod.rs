//! # Adapters
//!
//! In-memory collaborators for tests and embedders.

pub mod engine;
pub mod registry;

pub use engine::MockWasmEngine;
pub use registry::{code_checksum, HexAddressApi, InMemoryContractRegistry, InMemoryKvStore};

//! # WB-01 Contract Events - Telemetry Translation Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Contracts cannot emit ledger events directly. They return attributes and
//! custom events alongside their messages; this crate validates them and turns
//! them into ledger-visible [`Event`]s, always tagging them with the emitting
//! contract's address.
//!
//! ## Invariants
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Custom type name longer than 2 bytes after trimming | `translator::custom_events` |
//! | No empty key or value after trimming | `translator::contract_attributes` |
//! | No key in the reserved `_` namespace | `translator::contract_attributes` |
//! | Contract address attribute always first | `translator::contract_attributes` |
//! | All-or-nothing batches | every entry point returns `Result` with no partial list |
//!
//! ## Usage Example
//!
//! ```ignore
//! use wb_01_contract_events::prelude::*;
//!
//! let events = custom_events(&response.events, &contract)?;
//! ```
//!
//! [`Event`]: shared_types::Event

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod errors;
pub mod translator;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::{
        ContractAttribute, ContractEvent, ATTRIBUTE_KEY_CONTRACT_ADDR, ATTRIBUTE_RESERVED_PREFIX,
        CUSTOM_CONTRACT_EVENT_PREFIX, EVENT_TYPE_MIN_LENGTH, WASM_MODULE_EVENT_TYPE,
    };
    pub use crate::errors::EventError;
    pub use crate::translator::{contract_attributes, custom_events, module_event};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Contract Events";

//! # Contract Telemetry Types
//!
//! What the execution engine hands back next to a contract's messages.

use serde::{Deserialize, Serialize};

/// Type of the single event produced per invocation from loose attributes.
pub const WASM_MODULE_EVENT_TYPE: &str = "wasm";

/// Prefix prepended to every contract-declared event type.
pub const CUSTOM_CONTRACT_EVENT_PREFIX: &str = "wasm-";

/// Key of the synthesized attribute naming the emitting contract.
pub const ATTRIBUTE_KEY_CONTRACT_ADDR: &str = "_contract_address";

/// Keys starting with this prefix belong to the system.
pub const ATTRIBUTE_RESERVED_PREFIX: &str = "_";

/// Custom event types must be strictly longer than this after trimming.
pub const EVENT_TYPE_MIN_LENGTH: usize = 2;

/// Attribute as written by a contract. Not yet trimmed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractAttribute {
    /// Raw key.
    pub key: String,
    /// Raw value.
    pub value: String,
}

impl ContractAttribute {
    /// Creates an attribute.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Event declared by a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvent {
    /// Raw type name, without the system prefix.
    #[serde(rename = "type")]
    pub ty: String,
    /// Raw attributes.
    pub attributes: Vec<ContractAttribute>,
}

impl ContractEvent {
    /// Creates an event with no attributes.
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute append.
    #[must_use]
    pub fn add_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(ContractAttribute::new(key, value));
        self
    }

    /// Number of attributes, used for gas accounting.
    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }
}

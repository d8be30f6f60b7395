//! # Event Translator
//!
//! Turns contract telemetry into ledger events. Every entry point is
//! all-or-nothing: the first invalid attribute or event aborts the batch.

use crate::domain::{
    ContractAttribute, ContractEvent, ATTRIBUTE_KEY_CONTRACT_ADDR, ATTRIBUTE_RESERVED_PREFIX,
    CUSTOM_CONTRACT_EVENT_PREFIX, EVENT_TYPE_MIN_LENGTH, WASM_MODULE_EVENT_TYPE,
};
use crate::errors::EventError;
use shared_types::{Address, Attribute, Event};
use tracing::trace;

/// Builds the single `wasm` event for an invocation's loose attributes.
pub fn module_event(
    attributes: &[ContractAttribute],
    contract: &Address,
) -> Result<Event, EventError> {
    Ok(Event {
        ty: WASM_MODULE_EVENT_TYPE.to_string(),
        attributes: contract_attributes(attributes, contract)?,
    })
}

/// Validates and renames contract-declared events.
pub fn custom_events(
    events: &[ContractEvent],
    contract: &Address,
) -> Result<Vec<Event>, EventError> {
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        let ty = event.ty.trim();
        if ty.len() <= EVENT_TYPE_MIN_LENGTH {
            trace!(contract = %contract, ty, "rejecting custom event with short type");
            return Err(EventError::TypeTooShort(ty.to_string()));
        }
        out.push(Event {
            ty: format!("{CUSTOM_CONTRACT_EVENT_PREFIX}{ty}"),
            attributes: contract_attributes(&event.attributes, contract)?,
        });
    }
    Ok(out)
}

/// Trims and validates attributes, prepending the contract address.
pub fn contract_attributes(
    attributes: &[ContractAttribute],
    contract: &Address,
) -> Result<Vec<Attribute>, EventError> {
    let mut out = Vec::with_capacity(attributes.len() + 1);
    out.push(Attribute::new(ATTRIBUTE_KEY_CONTRACT_ADDR, contract.to_string()));
    for attr in attributes {
        let key = attr.key.trim();
        let value = attr.value.trim();
        if key.is_empty() {
            return Err(EventError::EmptyAttributeKey {
                value: value.to_string(),
            });
        }
        if value.is_empty() {
            return Err(EventError::EmptyAttributeValue {
                key: key.to_string(),
            });
        }
        if key.starts_with(ATTRIBUTE_RESERVED_PREFIX) {
            return Err(EventError::ReservedAttributeKey {
                key: key.to_string(),
            });
        }
        out.push(Attribute::new(key, value));
    }
    Ok(out)
}

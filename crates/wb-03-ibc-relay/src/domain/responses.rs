//! # Callback Responses

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Context, Event};
use wb_01_contract_events::domain::{ContractAttribute, ContractEvent};
use wb_02_message_dispatch::domain::ContractMsg;
use wb_02_message_dispatch::service::ContractResponse;

/// Response of every callback except open and receive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IbcBasicResponse {
    /// Messages to dispatch.
    #[serde(default)]
    pub messages: Vec<ContractMsg>,
    /// Loose attributes.
    #[serde(default)]
    pub attributes: Vec<ContractAttribute>,
    /// Contract-declared events.
    #[serde(default)]
    pub events: Vec<ContractEvent>,
}

impl From<IbcBasicResponse> for ContractResponse {
    fn from(res: IbcBasicResponse) -> Self {
        ContractResponse {
            messages: res.messages,
            attributes: res.attributes,
            events: res.events,
            data: None,
        }
    }
}

/// Successful packet receipt.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IbcReceiveResponse {
    /// Acknowledgement bytes returned to the protocol engine.
    #[serde_as(as = "Hex")]
    pub acknowledgement: Vec<u8>,
    /// Messages to dispatch.
    #[serde(default)]
    pub messages: Vec<ContractMsg>,
    /// Loose attributes.
    #[serde(default)]
    pub attributes: Vec<ContractAttribute>,
    /// Contract-declared events.
    #[serde(default)]
    pub events: Vec<ContractEvent>,
}

impl IbcReceiveResponse {
    /// Splits off the acknowledgement, keeping the dispatchable part.
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, ContractResponse) {
        let response = ContractResponse {
            messages: self.messages,
            attributes: self.attributes,
            events: self.events,
            data: None,
        };
        (self.acknowledgement, response)
    }
}

/// Receive outcome at application level. `Err` is a contract-reported
/// failure, distinct from an engine failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbcReceiveResult {
    /// Packet accepted.
    Ok(IbcReceiveResponse),
    /// Packet rejected by the contract.
    Err(String),
}

/// Ledger effects of a relayed callback.
#[derive(Debug, Clone)]
pub struct Relayed {
    /// Context after dispatch.
    pub ctx: Context,
    /// Events emitted.
    pub events: Vec<Event>,
}

/// Ledger effects of a received packet.
#[derive(Debug, Clone)]
pub struct Acknowledged {
    /// Context after dispatch.
    pub ctx: Context,
    /// Events emitted.
    pub events: Vec<Event>,
    /// Acknowledgement bytes for the protocol engine.
    pub acknowledgement: Vec<u8>,
}

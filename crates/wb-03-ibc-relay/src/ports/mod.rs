//! # Ports Layer
//!
//! - `inbound`: the six callbacks the protocol engine drives
//! - `outbound`: execution engine, contract registry, storage and address API

pub mod inbound;
pub mod outbound;

pub use inbound::IbcContractHandler;
pub use outbound::{AddressApi, ContractInstance, ContractRegistry, EngineOutput, KvStore, WasmEngine};

//! # WB-03 IBC Relay - Cross-Chain Callback Subsystem
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Bridges the channel/packet protocol engine to contract code. Six
//! callbacks cover the channel lifecycle; each runs the contract in the
//! execution engine and routes what it returns through the message handler
//! chain and the event translator.
//!
//! ## Callbacks
//!
//! | Callback | Trigger | Contract returns | On success |
//! |----------|---------|------------------|------------|
//! | `on_open_channel` | handshake init/try | version or none | version to protocol engine |
//! | `on_connect_channel` | handshake ack/confirm | messages + events | dispatched |
//! | `on_close_channel` | channel closing | messages + events | dispatched |
//! | `on_recv_packet` | packet delivery | ack + messages + events | ack to protocol engine |
//! | `on_ack_packet` | ack of a sent packet | messages + events | dispatched |
//! | `on_timeout_packet` | sent packet expired | messages + events | dispatched |
//!
//! ## Invariants
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Engine gas is charged before the engine error is looked at | `IbcRelay::invoke` |
//! | Engine failures surface as one error kind, never retried | `RelayError::ExecutionFailed` |
//! | A rejected packet produces no acknowledgement | `IbcRelay::on_recv_packet` |
//! | No relay-local state | channel state lives behind `ChannelKeeper` |
//! | Only `wasm.` ports reach contracts | `IbcContractModule` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use wb_03_ibc_relay::prelude::*;
//!
//! let relay = IbcRelay::new(registry, engine, Arc::new(HexAddressApi), responses);
//! let module = IbcContractModule::new(Arc::new(relay), channels);
//! let ack = module.on_recv_packet(&ctx, &packet, &relayer)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod metrics;
pub mod module;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{
        code_checksum, HexAddressApi, InMemoryContractRegistry, InMemoryKvStore, MockWasmEngine,
    };
    pub use crate::domain::{
        Acknowledged, Callback, Checksum, ContractInfo, Env, IbcBasicResponse, IbcChannel,
        IbcChannelCloseMsg, IbcChannelConnectMsg, IbcChannelOpenMsg, IbcPacketAckMsg,
        IbcPacketReceiveMsg, IbcPacketTimeoutMsg, IbcReceiveResponse, IbcReceiveResult, Relayed,
    };
    pub use crate::errors::{EngineError, RelayError};
    pub use crate::module::{ChannelOpening, IbcContractModule};
    pub use crate::ports::{
        AddressApi, ContractInstance, ContractRegistry, EngineOutput, IbcContractHandler,
        KvStore, WasmEngine,
    };
    pub use crate::service::IbcRelay;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "IBC Relay";

//! # Driven Ports (SPI - Outbound)
//!
//! The execution engine and the contract registry are external: the relay
//! only calls them.

use crate::domain::{
    Checksum, ContractInfo, Env, IbcBasicResponse, IbcChannelCloseMsg, IbcChannelConnectMsg,
    IbcChannelOpenMsg, IbcPacketAckMsg, IbcPacketReceiveMsg, IbcPacketTimeoutMsg,
    IbcReceiveResult,
};
use crate::errors::EngineError;
use shared_types::{Address, Context};
use std::sync::Arc;

// =============================================================================
// EXECUTION ENGINE
// =============================================================================

/// Engine result plus the gas it burned. Gas is reported on both paths so the
/// caller can charge it before looking at the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput<T> {
    /// Contract result.
    pub result: Result<T, EngineError>,
    /// Engine gas consumed.
    pub gas_used: u64,
}

impl<T> EngineOutput<T> {
    /// Successful call.
    pub fn ok(value: T, gas_used: u64) -> Self {
        Self {
            result: Ok(value),
            gas_used,
        }
    }

    /// Failed call.
    pub fn err(msg: impl Into<String>, gas_used: u64) -> Self {
        Self {
            result: Err(EngineError::new(msg)),
            gas_used,
        }
    }
}

/// Sandboxed contract execution engine, protocol entry points only.
pub trait WasmEngine: Send + Sync {
    /// Handshake init/try. `Ok(None)` means no version preference.
    fn ibc_channel_open(
        &self,
        checksum: &Checksum,
        env: &Env,
        msg: &IbcChannelOpenMsg,
        store: &dyn KvStore,
        api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<Option<String>>;

    /// Handshake ack/confirm.
    fn ibc_channel_connect(
        &self,
        checksum: &Checksum,
        env: &Env,
        msg: &IbcChannelConnectMsg,
        store: &dyn KvStore,
        api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcBasicResponse>;

    /// Channel close.
    fn ibc_channel_close(
        &self,
        checksum: &Checksum,
        env: &Env,
        msg: &IbcChannelCloseMsg,
        store: &dyn KvStore,
        api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcBasicResponse>;

    /// Packet delivery.
    fn ibc_packet_receive(
        &self,
        checksum: &Checksum,
        env: &Env,
        msg: &IbcPacketReceiveMsg,
        store: &dyn KvStore,
        api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcReceiveResult>;

    /// Acknowledgement.
    fn ibc_packet_ack(
        &self,
        checksum: &Checksum,
        env: &Env,
        msg: &IbcPacketAckMsg,
        store: &dyn KvStore,
        api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcBasicResponse>;

    /// Timeout.
    fn ibc_packet_timeout(
        &self,
        checksum: &Checksum,
        env: &Env,
        msg: &IbcPacketTimeoutMsg,
        store: &dyn KvStore,
        api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcBasicResponse>;
}

// =============================================================================
// STORAGE AND ADDRESSES
// =============================================================================

/// A contract's isolated key/value view.
pub trait KvStore: Send + Sync {
    /// Reads a key.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    /// Writes a key.
    fn set(&self, key: &[u8], value: &[u8]);
    /// Deletes a key.
    fn remove(&self, key: &[u8]);
}

/// Address conversion callbacks offered to contracts.
pub trait AddressApi: Send + Sync {
    /// Human-readable to canonical.
    fn canonicalize(&self, human: &str) -> Result<Address, String>;
    /// Canonical to human-readable.
    fn humanize(&self, canonical: &Address) -> String;
}

// =============================================================================
// CONTRACT REGISTRY
// =============================================================================

/// Everything the relay needs to call a contract.
#[derive(Clone)]
pub struct ContractInstance {
    /// Registry metadata.
    pub info: ContractInfo,
    /// Code checksum.
    pub checksum: Checksum,
    /// Isolated storage.
    pub store: Arc<dyn KvStore>,
}

impl std::fmt::Debug for ContractInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractInstance")
            .field("info", &self.info)
            .field("checksum", &hex::encode(self.checksum))
            .finish_non_exhaustive()
    }
}

/// Resolves contracts by address.
pub trait ContractRegistry: Send + Sync {
    /// Code and storage of a contract, if it exists.
    fn contract(&self, ctx: &Context, address: &Address) -> Option<ContractInstance>;
}

//! # Error Types

use shared_types::{Address, AddressError, Classified, ErrorClass, OutOfGas};
use thiserror::Error;
use wb_02_message_dispatch::errors::DispatchError;

/// Execution-engine failure. Carries only the engine's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    /// Creates an engine error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Errors raised by the relay and the port module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// No contract at the address.
    #[error("contract not found: {0}")]
    ContractNotFound(Address),

    /// Port id does not name a contract.
    #[error(transparent)]
    InvalidPort(#[from] AddressError),

    /// Channel unknown to the protocol engine.
    #[error("channel not found: port {port_id}, channel {channel_id}")]
    ChannelNotFound {
        /// Port id.
        port_id: String,
        /// Channel id.
        channel_id: String,
    },

    /// The engine failed, or the contract rejected a packet. Gas is
    /// already charged. Never retried.
    #[error("execute wasm contract failed: {0}")]
    ExecutionFailed(String),

    /// Gas exhausted while charging engine gas.
    #[error(transparent)]
    OutOfGas(#[from] OutOfGas),

    /// Dispatching the contract's response failed.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl Classified for RelayError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::ContractNotFound(_) | Self::ChannelNotFound { .. } => ErrorClass::NotFound,
            Self::InvalidPort(_) => ErrorClass::Validation,
            Self::ExecutionFailed(_) => ErrorClass::ExecutionFailure,
            Self::OutOfGas(_) => ErrorClass::ResourceExhausted,
            Self::Dispatch(err) => err.class(),
        }
    }
}

//! # Error Types
//!
//! Every failure a handler can raise while resolving a contract message.

use shared_types::{Address, AddressError, Classified, CoinError, ErrorClass, OutOfGas};
use thiserror::Error;
use wb_01_contract_events::errors::EventError;

// =============================================================================
// DISPATCH ERRORS
// =============================================================================

/// Errors raised by encoders, handlers and the handler chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Decline sentinel: the component does not recognize this message shape.
    #[error("unknown message from the contract: {0}")]
    UnknownMsg(String),

    /// Every handler in the chain declined.
    #[error("unrecognized message: no handler found for {0}")]
    NoHandlerFound(String),

    /// Malformed message content.
    #[error("invalid message: {0}")]
    InvalidMsg(String),

    /// Coin conversion or validation failed.
    #[error(transparent)]
    Coin(#[from] CoinError),

    /// Address parsing failed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// Contract telemetry failed validation.
    #[error(transparent)]
    Event(#[from] EventError),

    /// An operation names a signer other than the invoking contract.
    #[error("contract doesn't have permission: signer {signer} is not contract {contract}")]
    Unauthorized {
        /// Signer found on the operation.
        signer: Address,
        /// Invoking contract.
        contract: Address,
    },

    /// The host router has no handler for an operation type.
    #[error("can't route message: unrecognized operation {type_url}")]
    UnroutableOperation {
        /// Type URL of the operation.
        type_url: String,
    },

    /// Contract has no protocol port bound.
    #[error("IBC not supported for this contract")]
    IbcUnsupported,

    /// Packet-send with an empty channel id.
    #[error("empty ibc channel")]
    EmptyChannel,

    /// Protocol engine has no next sequence for the channel.
    #[error("sequence send not found: port {port_id}, channel {channel_id}")]
    SequenceSendNotFound {
        /// Port id.
        port_id: String,
        /// Channel id.
        channel_id: String,
    },

    /// Protocol engine has no descriptor for the channel.
    #[error("invalid channel: port {port_id}, channel {channel_id}")]
    ChannelNotFound {
        /// Port id.
        port_id: String,
        /// Channel id.
        channel_id: String,
    },

    /// No capability held for the channel.
    #[error("channel capability not found: {path}")]
    CapabilityNotFound {
        /// Capability path.
        path: String,
    },

    /// Zero amount or balance too low.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// Transaction gas exhausted.
    #[error(transparent)]
    OutOfGas(#[from] OutOfGas),

    /// A routed host operation failed while executing.
    #[error("operation {type_url} failed: {reason}")]
    OperationFailed {
        /// Type URL of the operation.
        type_url: String,
        /// Host-reported reason.
        reason: String,
    },
}

impl DispatchError {
    /// Shorthand for the decline sentinel.
    pub fn unknown(what: impl Into<String>) -> Self {
        Self::UnknownMsg(what.into())
    }

    /// Returns true for the decline sentinel.
    #[must_use]
    pub fn is_decline(&self) -> bool {
        matches!(self, Self::UnknownMsg(_))
    }
}

impl Classified for DispatchError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownMsg(_) => ErrorClass::Decline,
            Self::NoHandlerFound(_)
            | Self::InvalidMsg(_)
            | Self::Coin(_)
            | Self::Address(_)
            | Self::Event(_)
            | Self::IbcUnsupported
            | Self::EmptyChannel
            | Self::InsufficientFunds(_) => ErrorClass::Validation,
            Self::Unauthorized { .. } => ErrorClass::Authorization,
            Self::UnroutableOperation { .. }
            | Self::SequenceSendNotFound { .. }
            | Self::ChannelNotFound { .. }
            | Self::CapabilityNotFound { .. } => ErrorClass::NotFound,
            Self::OperationFailed { .. } => ErrorClass::ExecutionFailure,
            Self::OutOfGas(_) => ErrorClass::ResourceExhausted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unknown_msg_declines() {
        assert!(DispatchError::unknown("bank burn").is_decline());
        assert_eq!(DispatchError::unknown("x").class(), ErrorClass::Decline);
        assert!(!DispatchError::NoHandlerFound("x".into()).is_decline());
        assert!(!DispatchError::EmptyChannel.is_decline());
    }

    #[test]
    fn test_taxonomy() {
        let contract = Address::contract("wasm", 1, 1);
        let other = Address::contract("wasm", 1, 2);
        assert_eq!(
            DispatchError::Unauthorized {
                signer: other,
                contract,
            }
            .class(),
            ErrorClass::Authorization
        );
        assert_eq!(
            DispatchError::CapabilityNotFound { path: "p".into() }.class(),
            ErrorClass::NotFound
        );
        let oog = OutOfGas {
            descriptor: "test".into(),
            limit: 1,
            consumed: 2,
        };
        assert!(DispatchError::from(oog).class().is_fatal());
    }

    #[test]
    fn test_permission_message() {
        let err = DispatchError::Unauthorized {
            signer: Address::new(vec![1]),
            contract: Address::new(vec![2]),
        };
        assert!(err.to_string().starts_with("contract doesn't have permission"));
    }
}

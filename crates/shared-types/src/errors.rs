//! # Error Types
//!
//! Error taxonomy shared by all subsystems, plus the errors raised by the
//! primitives in this crate.

use thiserror::Error;

/// Coarse classification of every failure raised by the bridge.
///
/// Only [`ErrorClass::Decline`] is recoverable inside a dispatch: the handler
/// chain moves on to the next handler. [`ErrorClass::ResourceExhausted`] is
/// fatal to the whole enclosing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The component does not recognize the input. Not a real failure.
    Decline,
    /// Malformed input.
    Validation,
    /// Signer or ownership mismatch.
    Authorization,
    /// A required sequence, channel, capability, route or contract is missing.
    NotFound,
    /// The execution engine reported a fault (gas already charged).
    ExecutionFailure,
    /// Gas exhausted. Aborts the enclosing transaction.
    ResourceExhausted,
}

impl ErrorClass {
    /// Short label, used for metrics and structured logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decline => "decline",
            Self::Validation => "validation",
            Self::Authorization => "authorization",
            Self::NotFound => "not_found",
            Self::ExecutionFailure => "execution_failure",
            Self::ResourceExhausted => "resource_exhausted",
        }
    }

    /// Returns true if the failure must abort the whole transaction.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::ResourceExhausted)
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every subsystem error so callers can branch on the class.
pub trait Classified {
    /// The taxonomy class of this error.
    fn class(&self) -> ErrorClass;
}

/// Errors from address parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Empty address string.
    #[error("empty address string is not allowed")]
    Empty,

    /// Address is not valid hex.
    #[error("invalid address {input:?}: {reason}")]
    InvalidHex { input: String, reason: String },

    /// Port id does not belong to a contract.
    #[error("invalid contract port id {0:?}")]
    InvalidPortId(String),
}

/// Errors from coin construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinError {
    /// Denomination does not satisfy the denom rules.
    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    /// Amount string is not a base-10 integer.
    #[error("invalid amount {amount:?} for denom {denom}")]
    InvalidAmount { denom: String, amount: String },

    /// A coin in a set has a zero amount.
    #[error("coin {denom} amount is not positive")]
    NotPositive { denom: String },

    /// The same denom appears twice in a set.
    #[error("duplicate denomination {0}")]
    DuplicateDenom(String),

    /// Subtraction would go below zero.
    #[error("insufficient funds: {available} is smaller than {required}")]
    Insufficient { required: String, available: String },

    /// Addition overflowed 256 bits.
    #[error("coin amount overflow for {0}")]
    Overflow(String),
}

impl Classified for AddressError {
    fn class(&self) -> ErrorClass {
        ErrorClass::Validation
    }
}

impl Classified for CoinError {
    fn class(&self) -> ErrorClass {
        ErrorClass::Validation
    }
}

//! # Gas Meter
//!
//! Per-transaction gas accounting. A meter without a limit is infinite.

use thiserror::Error;

/// Gas limit reached. Fatal to the enclosing transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("out of gas in location: {descriptor}; gas wanted: {limit}, gas used: {consumed}")]
pub struct OutOfGas {
    /// What was being charged when the limit was hit.
    pub descriptor: String,
    /// Meter limit.
    pub limit: u64,
    /// Consumption including the failed charge.
    pub consumed: u64,
}

/// Tracks gas consumed against an optional limit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GasMeter {
    limit: Option<u64>,
    consumed: u64,
}

impl GasMeter {
    /// Meter with a hard limit.
    #[must_use]
    pub const fn new(limit: u64) -> Self {
        Self {
            limit: Some(limit),
            consumed: 0,
        }
    }

    /// Meter without a limit.
    #[must_use]
    pub const fn infinite() -> Self {
        Self {
            limit: None,
            consumed: 0,
        }
    }

    /// The limit, `None` for an infinite meter.
    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Total gas consumed so far (may exceed the limit after a failed charge).
    #[must_use]
    pub const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Consumption capped at the limit.
    #[must_use]
    pub fn consumed_to_limit(&self) -> u64 {
        match self.limit {
            Some(limit) => self.consumed.min(limit),
            None => self.consumed,
        }
    }

    /// Gas left before the limit, `None` for an infinite meter.
    #[must_use]
    pub fn remaining(&self) -> Option<u64> {
        self.limit.map(|limit| limit.saturating_sub(self.consumed))
    }

    /// Returns true once consumption has reached the limit.
    #[must_use]
    pub fn is_out_of_gas(&self) -> bool {
        self.limit.is_some_and(|limit| self.consumed >= limit)
    }

    /// Charges gas. The charge is recorded even when it overflows the limit.
    pub fn consume(&mut self, amount: u64, descriptor: &str) -> Result<(), OutOfGas> {
        self.consumed = self.consumed.saturating_add(amount);
        match self.limit {
            Some(limit) if self.consumed > limit => Err(OutOfGas {
                descriptor: descriptor.to_string(),
                limit,
                consumed: self.consumed,
            }),
            _ => Ok(()),
        }
    }
}

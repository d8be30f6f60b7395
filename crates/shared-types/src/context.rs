//! # Transaction Context
//!
//! The context handed to every component for the duration of one dispatch.
//! It is cheap to clone: block info is plain data and the gas meter is a
//! shared handle, so every clone charges the same transaction meter.

use crate::gas::{GasMeter, OutOfGas};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Block-level information visible to contracts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block height.
    pub height: u64,
    /// Block time in nanoseconds since the Unix epoch (from the header, never
    /// the local clock).
    pub time: u64,
    /// Chain identifier.
    pub chain_id: String,
}

/// Mutable transaction context, threaded through dispatch by value.
#[derive(Debug, Clone)]
pub struct Context {
    block: BlockInfo,
    gas_meter: Arc<Mutex<GasMeter>>,
}

impl Context {
    /// New context with its own gas meter.
    #[must_use]
    pub fn new(block: BlockInfo, gas_meter: GasMeter) -> Self {
        Self {
            block,
            gas_meter: Arc::new(Mutex::new(gas_meter)),
        }
    }

    /// Block information.
    #[must_use]
    pub fn block(&self) -> &BlockInfo {
        &self.block
    }

    /// Block height shortcut.
    #[must_use]
    pub fn block_height(&self) -> u64 {
        self.block.height
    }

    /// Copy of this context pointing at another block.
    #[must_use]
    pub fn with_block(&self, block: BlockInfo) -> Self {
        Self {
            block,
            gas_meter: Arc::clone(&self.gas_meter),
        }
    }

    /// Copy of this context with a fresh, independent gas meter.
    #[must_use]
    pub fn with_gas_meter(&self, gas_meter: GasMeter) -> Self {
        Self::new(self.block.clone(), gas_meter)
    }

    /// Charges the shared meter.
    pub fn consume_gas(&self, amount: u64, descriptor: &str) -> Result<(), OutOfGas> {
        self.gas_meter.lock().consume(amount, descriptor)
    }

    /// Snapshot of the gas meter state.
    #[must_use]
    pub fn gas_meter(&self) -> GasMeter {
        self.gas_meter.lock().clone()
    }

    /// Gas consumed so far.
    #[must_use]
    pub fn gas_consumed(&self) -> u64 {
        self.gas_meter.lock().consumed()
    }

    /// Returns true if both contexts charge the same meter.
    #[must_use]
    pub fn shares_gas_meter(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.gas_meter, &other.gas_meter)
    }
}

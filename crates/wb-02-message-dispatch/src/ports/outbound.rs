//! # Driven Ports (SPI - Outbound)
//!
//! Host services the handlers depend on:
//! - Message encoding (contract message to ledger operations)
//! - Operation routing (ledger operation to host module)
//! - Channel/packet registry of the protocol engine
//! - Capability registry
//! - Burn-eligible module accounts

use crate::domain::{ContractMsg, LedgerOp, OpResponse};
use crate::errors::DispatchError;
use shared_types::{Address, Capability, ChannelInfo, Coins, Context, Packet};
use std::sync::Arc;

// =============================================================================
// ENCODING
// =============================================================================

/// Turns a contract message into host ledger operations.
///
/// Returning [`DispatchError::UnknownMsg`] declines the message.
pub trait MessageEncoder: Send + Sync {
    /// Encodes `msg` sent by `contract`.
    fn encode(
        &self,
        contract: &Address,
        ibc_port: &str,
        msg: &ContractMsg,
    ) -> Result<Vec<LedgerOp>, DispatchError>;
}

// =============================================================================
// ROUTING
// =============================================================================

/// Executes one ledger operation, returning the context to continue with.
pub type OperationHandler =
    Arc<dyn Fn(Context, &LedgerOp) -> Result<(Context, OpResponse), DispatchError> + Send + Sync>;

/// Host router resolving operations to module handlers.
pub trait OperationRouter: Send + Sync {
    /// Handler registered for the operation's type, if any.
    fn handler(&self, op: &LedgerOp) -> Option<OperationHandler>;
}

// =============================================================================
// PROTOCOL ENGINE
// =============================================================================

/// Channel/packet registry of the cross-chain protocol engine.
pub trait ChannelKeeper: Send + Sync {
    /// Next sequence number to send on a channel.
    fn next_sequence_send(&self, ctx: &Context, port_id: &str, channel_id: &str) -> Option<u64>;

    /// Channel descriptor.
    fn get_channel(&self, ctx: &Context, port_id: &str, channel_id: &str) -> Option<ChannelInfo>;

    /// Submits a packet, proving channel ownership with `capability`.
    fn send_packet(
        &self,
        ctx: &Context,
        capability: &Capability,
        packet: Packet,
    ) -> Result<(), DispatchError>;
}

/// Registry of ownership tokens for named protocol resources.
pub trait CapabilityKeeper: Send + Sync {
    /// Capability held under `path`, if any.
    fn get_capability(&self, ctx: &Context, path: &str) -> Option<Capability>;
}

// =============================================================================
// FUNDS
// =============================================================================

/// Module-account service able to destroy funds.
pub trait Burner: Send + Sync {
    /// Moves funds from an account into a module account.
    fn send_coins_from_account_to_module(
        &self,
        ctx: &Context,
        from: &Address,
        module: &str,
        amount: &Coins,
    ) -> Result<(), DispatchError>;

    /// Destroys funds held by a module account.
    fn burn_coins(&self, ctx: &Context, module: &str, amount: &Coins) -> Result<(), DispatchError>;
}

//! # Driving Ports (API - Inbound)
//!
//! Every element of the handler chain, and the chain itself, is a
//! [`Messenger`]. New message kinds are supported by adding a messenger to a
//! chain, never by editing an existing one.

use crate::domain::{ContractMsg, HandlerOutcome};
use shared_types::{Address, Context};

/// Resolves one contract message against the ledger.
///
/// Implementations must be deterministic: no wall-clock time, no external
/// randomness, no retries. `ibc_port` is empty when the contract has no
/// protocol port bound.
pub trait Messenger: Send + Sync {
    /// Tries to service `msg` on behalf of `contract`.
    fn dispatch_msg(
        &self,
        ctx: &Context,
        contract: &Address,
        ibc_port: &str,
        msg: &ContractMsg,
    ) -> HandlerOutcome;

    /// Name used in logs and metrics.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> Messenger for F
where
    F: Fn(&Context, &Address, &str, &ContractMsg) -> HandlerOutcome + Send + Sync,
{
    fn dispatch_msg(
        &self,
        ctx: &Context,
        contract: &Address,
        ibc_port: &str,
        msg: &ContractMsg,
    ) -> HandlerOutcome {
        self(ctx, contract, ibc_port, msg)
    }
}

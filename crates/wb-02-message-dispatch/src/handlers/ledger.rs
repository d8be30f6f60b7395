//! # Ledger-Operation Handler
//!
//! Encodes a contract message into host operations, then validates,
//! authorizes, routes and executes them one by one.
//!
//! ## Authorization
//!
//! A contract may only author operations on its own behalf: every signer of
//! every operation must equal the invoking contract.
//!
//! ## Partial failure
//!
//! When operation `n` fails, the outputs of operations `0..n` are dropped
//! from the return value. State those operations already wrote through the
//! context is not unwound here; the caller's checkpoint boundary owns that.

use crate::domain::{ContractMsg, Dispatched, HandlerOutcome, LedgerOp};
use crate::errors::DispatchError;
use crate::metrics;
use crate::ports::{MessageEncoder, Messenger, OperationRouter};
use shared_types::{Address, Context};
use std::sync::Arc;
use tracing::{trace, warn};

/// Handler for every message that encodes into ledger operations.
#[derive(Clone)]
pub struct LedgerOperationHandler {
    router: Arc<dyn OperationRouter>,
    encoder: Arc<dyn MessageEncoder>,
}

impl LedgerOperationHandler {
    /// Creates the handler.
    pub fn new(router: Arc<dyn OperationRouter>, encoder: Arc<dyn MessageEncoder>) -> Self {
        Self { router, encoder }
    }

    /// Validates, authorizes, routes and executes `ops` in order.
    pub fn execute(
        &self,
        ctx: &Context,
        contract: &Address,
        ops: &[LedgerOp],
    ) -> Result<Dispatched, DispatchError> {
        let mut working = ctx.clone();
        let mut events = Vec::new();
        let mut data = Vec::with_capacity(ops.len());

        for op in ops {
            op.validate_basic()?;
            for signer in op.signers() {
                if signer != contract {
                    warn!(
                        contract = %contract,
                        signer = %signer,
                        op = op.type_url(),
                        "rejecting operation signed by another account"
                    );
                    return Err(DispatchError::Unauthorized {
                        signer: signer.clone(),
                        contract: contract.clone(),
                    });
                }
            }
            let handler =
                self.router
                    .handler(op)
                    .ok_or_else(|| DispatchError::UnroutableOperation {
                        type_url: op.type_url().to_string(),
                    })?;
            let (next, response) = handler(working, op)?;
            working = next;
            events.extend(response.events);
            data.push(response.data);
            metrics::record_operation_executed();
        }

        Ok(Dispatched {
            ctx: working,
            events,
            data,
        })
    }
}

impl Messenger for LedgerOperationHandler {
    fn dispatch_msg(
        &self,
        ctx: &Context,
        contract: &Address,
        ibc_port: &str,
        msg: &ContractMsg,
    ) -> HandlerOutcome {
        let ops = match self.encoder.encode(contract, ibc_port, msg) {
            Ok(ops) => ops,
            Err(err) => return HandlerOutcome::from_result(Err(err)),
        };
        if ops.is_empty() {
            trace!(msg = msg.name(), "message encoded into no operations");
            return HandlerOutcome::NotMine;
        }
        HandlerOutcome::claimed(self.execute(ctx, contract, &ops))
    }

    fn name(&self) -> &'static str {
        "ledger"
    }
}

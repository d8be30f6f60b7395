//! # Message Handler Chain
//!
//! First match wins. A handler that declines passes the message on; any
//! other failure stops the chain. Outputs of different handlers are never
//! merged.

use crate::domain::{ContractMsg, Dispatched, HandlerOutcome};
use crate::errors::DispatchError;
use crate::metrics;
use crate::ports::Messenger;
use shared_types::{Address, Classified, Context};
use std::sync::Arc;
use tracing::{debug, trace};

/// Ordered list of messengers.
#[derive(Clone)]
pub struct MessageHandlerChain {
    handlers: Vec<Arc<dyn Messenger>>,
}

impl std::fmt::Debug for MessageHandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.handlers.iter().map(|h| h.name()).collect();
        f.debug_struct("MessageHandlerChain")
            .field("handlers", &names)
            .finish()
    }
}

impl MessageHandlerChain {
    /// Builds a chain from configured slots.
    ///
    /// # Panics
    ///
    /// Panics if any slot is unset. A chain with a hole is a wiring bug and
    /// the node must not start with it.
    #[must_use]
    pub fn new(slots: Vec<Option<Arc<dyn Messenger>>>) -> Self {
        let handlers = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| match slot {
                Some(handler) => handler,
                None => panic!("message handler chain: handler slot {i} is not set"),
            })
            .collect();
        Self { handlers }
    }

    /// Builds a chain from handlers.
    #[must_use]
    pub fn from_handlers(handlers: Vec<Arc<dyn Messenger>>) -> Self {
        Self { handlers }
    }

    /// Adds a handler tried before all existing ones.
    #[must_use]
    pub fn prepend(mut self, handler: Arc<dyn Messenger>) -> Self {
        self.handlers.insert(0, handler);
        self
    }

    /// Adds a handler tried after all existing ones.
    #[must_use]
    pub fn append(mut self, handler: Arc<dyn Messenger>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Number of handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if the chain has no handlers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Dispatches `msg`, flattening the outcome into a `Result`.
    pub fn dispatch(
        &self,
        ctx: &Context,
        contract: &Address,
        ibc_port: &str,
        msg: &ContractMsg,
    ) -> Result<Dispatched, DispatchError> {
        match self.dispatch_msg(ctx, contract, ibc_port, msg) {
            HandlerOutcome::Claimed(dispatched) => Ok(dispatched),
            HandlerOutcome::Failed(err) => Err(err),
            HandlerOutcome::NotMine => Err(DispatchError::NoHandlerFound(msg.name().to_string())),
        }
    }
}

impl Messenger for MessageHandlerChain {
    fn dispatch_msg(
        &self,
        ctx: &Context,
        contract: &Address,
        ibc_port: &str,
        msg: &ContractMsg,
    ) -> HandlerOutcome {
        for handler in &self.handlers {
            let outcome = handler.dispatch_msg(ctx, contract, ibc_port, msg);
            metrics::record_handler_outcome(handler.name(), outcome.label());
            match outcome {
                HandlerOutcome::NotMine => {
                    trace!(handler = handler.name(), msg = msg.name(), "handler declined");
                }
                HandlerOutcome::Claimed(dispatched) => {
                    debug!(
                        handler = handler.name(),
                        contract = %contract,
                        msg = msg.name(),
                        events = dispatched.events.len(),
                        "message dispatched"
                    );
                    return HandlerOutcome::Claimed(dispatched);
                }
                HandlerOutcome::Failed(err) => {
                    metrics::record_dispatch_rejected(err.class().as_str());
                    return HandlerOutcome::Failed(err);
                }
            }
        }
        HandlerOutcome::Failed(DispatchError::NoHandlerFound(msg.name().to_string()))
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BankMsg, WasmCoin};
    use shared_types::{BlockInfo, Event, GasMeter};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ctx() -> Context {
        Context::new(BlockInfo::default(), GasMeter::infinite())
    }

    fn msg() -> ContractMsg {
        ContractMsg::Bank(BankMsg::Send {
            to_address: "0a".into(),
            amount: vec![WasmCoin::new("ustake", 1)],
        })
    }

    fn declining() -> Arc<dyn Messenger> {
        Arc::new(|_: &Context, _: &Address, _: &str, _: &ContractMsg| HandlerOutcome::NotMine)
    }

    fn claiming(tag: &'static str) -> Arc<dyn Messenger> {
        Arc::new(move |ctx: &Context, _: &Address, _: &str, _: &ContractMsg| {
            HandlerOutcome::Claimed(Dispatched {
                ctx: ctx.clone(),
                events: vec![Event::new(tag)],
                data: vec![tag.as_bytes().to_vec()],
            })
        })
    }

    fn failing() -> Arc<dyn Messenger> {
        Arc::new(|_: &Context, _: &Address, _: &str, _: &ContractMsg| {
            HandlerOutcome::Failed(DispatchError::EmptyChannel)
        })
    }

    struct MustNotRun(AtomicUsize);

    impl Messenger for MustNotRun {
        fn dispatch_msg(&self, _: &Context, _: &Address, _: &str, _: &ContractMsg) -> HandlerOutcome {
            self.0.fetch_add(1, Ordering::SeqCst);
            HandlerOutcome::NotMine
        }
    }

    #[test]
    fn test_decline_then_claim_returns_claimer_result() {
        let chain = MessageHandlerChain::from_handlers(vec![declining(), claiming("second")]);
        let out = chain
            .dispatch(&ctx(), &Address::new(vec![1]), "", &msg())
            .unwrap();
        assert_eq!(out.events, vec![Event::new("second")]);
        assert_eq!(out.data, vec![b"second".to_vec()]);
    }

    #[test]
    fn test_first_claim_wins_without_merging() {
        let chain = MessageHandlerChain::from_handlers(vec![claiming("first"), claiming("second")]);
        let out = chain
            .dispatch(&ctx(), &Address::new(vec![1]), "", &msg())
            .unwrap();
        assert_eq!(out.events, vec![Event::new("first")]);
    }

    #[test]
    fn test_all_decline_is_unrecognized() {
        let chain = MessageHandlerChain::from_handlers(vec![declining(), declining()]);
        let err = chain
            .dispatch(&ctx(), &Address::new(vec![1]), "", &msg())
            .unwrap_err();
        assert!(matches!(err, DispatchError::NoHandlerFound(ref m) if m == "bank.send"));

        let empty = MessageHandlerChain::from_handlers(vec![]);
        assert!(matches!(
            empty.dispatch_msg(&ctx(), &Address::new(vec![1]), "", &msg()),
            HandlerOutcome::Failed(DispatchError::NoHandlerFound(_))
        ));
    }

    #[test]
    fn test_failure_stops_the_chain() {
        let spy = Arc::new(MustNotRun(AtomicUsize::new(0)));
        let chain = MessageHandlerChain::from_handlers(vec![
            declining(),
            failing(),
            spy.clone() as Arc<dyn Messenger>,
            claiming("never"),
        ]);
        let err = chain
            .dispatch(&ctx(), &Address::new(vec![1]), "", &msg())
            .unwrap_err();
        assert_eq!(err, DispatchError::EmptyChannel);
        assert_eq!(spy.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_prepend_takes_priority() {
        let chain = MessageHandlerChain::from_handlers(vec![claiming("base")])
            .prepend(claiming("front"))
            .append(claiming("back"));
        assert_eq!(chain.len(), 3);
        let out = chain
            .dispatch(&ctx(), &Address::new(vec![1]), "", &msg())
            .unwrap();
        assert_eq!(out.events, vec![Event::new("front")]);
    }

    #[test]
    #[should_panic(expected = "handler slot 1 is not set")]
    fn test_unset_slot_is_fatal() {
        let _ = MessageHandlerChain::new(vec![Some(declining()), None]);
    }
}

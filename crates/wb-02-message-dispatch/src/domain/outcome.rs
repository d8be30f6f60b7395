//! # Dispatch Outcomes

use crate::errors::DispatchError;
use shared_types::{Context, Event};

/// Output of a successfully dispatched message.
///
/// `data` holds one entry per ledger operation actually executed, in
/// execution order.
#[derive(Debug, Clone)]
pub struct Dispatched {
    /// Working context after the dispatch.
    pub ctx: Context,
    /// Ledger events, in emission order.
    pub events: Vec<Event>,
    /// Opaque result bytes.
    pub data: Vec<Vec<u8>>,
}

impl Dispatched {
    /// A dispatch with no observable output.
    #[must_use]
    pub fn empty(ctx: Context) -> Self {
        Self {
            ctx,
            events: Vec::new(),
            data: Vec::new(),
        }
    }
}

/// What a single handler made of a message.
#[derive(Debug, Clone)]
pub enum HandlerOutcome {
    /// The handler serviced the message.
    Claimed(Dispatched),
    /// The handler does not recognize the message. The chain moves on.
    NotMine,
    /// The handler recognized the message and failed.
    Failed(DispatchError),
}

impl HandlerOutcome {
    /// Lifts a handler result, turning the decline sentinel into `NotMine`.
    #[must_use]
    pub fn from_result(result: Result<Dispatched, DispatchError>) -> Self {
        match result {
            Ok(dispatched) => Self::Claimed(dispatched),
            Err(err) if err.is_decline() => Self::NotMine,
            Err(err) => Self::Failed(err),
        }
    }

    /// Lifts the result of a handler that has already claimed the message.
    /// Every error is a failure, including the decline sentinel raised by a
    /// collaborator.
    #[must_use]
    pub fn claimed(result: Result<Dispatched, DispatchError>) -> Self {
        match result {
            Ok(dispatched) => Self::Claimed(dispatched),
            Err(err) => Self::Failed(err),
        }
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Claimed(_) => "claimed",
            Self::NotMine => "not_mine",
            Self::Failed(_) => "failed",
        }
    }

    /// Returns true for `NotMine`.
    #[must_use]
    pub const fn is_not_mine(&self) -> bool {
        matches!(self, Self::NotMine)
    }
}

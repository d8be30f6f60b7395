//! Type-URL keyed operation router.

use crate::domain::LedgerOp;
use crate::ports::{OperationHandler, OperationRouter};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Router mapping operation type URLs to module handlers.
#[derive(Default)]
pub struct MsgServiceRouter {
    routes: RwLock<HashMap<String, OperationHandler>>,
}

impl MsgServiceRouter {
    /// Empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the handler for a type URL.
    pub fn register(&self, type_url: impl Into<String>, handler: OperationHandler) {
        self.routes.write().insert(type_url.into(), handler);
    }

    /// Returns true if a handler is registered for `type_url`.
    #[must_use]
    pub fn has_route(&self, type_url: &str) -> bool {
        self.routes.read().contains_key(type_url)
    }
}

impl std::fmt::Debug for MsgServiceRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<String> = self.routes.read().keys().cloned().collect();
        routes.sort();
        f.debug_struct("MsgServiceRouter")
            .field("routes", &routes)
            .finish()
    }
}

impl OperationRouter for MsgServiceRouter {
    fn handler(&self, op: &LedgerOp) -> Option<OperationHandler> {
        self.routes.read().get(op.type_url()).cloned()
    }
}

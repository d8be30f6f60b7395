//! In-memory bank: balances, total supply and module accounts.
//!
//! `snapshot`/`restore` give callers a checkpoint boundary around a dispatch,
//! which the handlers themselves never provide.

use crate::domain::{LedgerOp, OpResponse};
use crate::errors::DispatchError;
use crate::ports::{Burner, OperationHandler};
use parking_lot::RwLock;
use shared_types::{Address, CoinError, Coins, Context, Event};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Frozen copy of the bank state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BankSnapshot {
    balances: HashMap<Address, Coins>,
    supply: Coins,
}

/// Bank kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryBank {
    state: RwLock<BankSnapshot>,
    burner_modules: HashSet<String>,
}

impl InMemoryBank {
    /// Empty bank with no burn-eligible modules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `module` permission to destroy funds.
    #[must_use]
    pub fn with_burner_module(mut self, module: impl Into<String>) -> Self {
        self.burner_modules.insert(module.into());
        self
    }

    /// Account address of a module.
    #[must_use]
    pub fn module_address(module: &str) -> Address {
        Address::module(module, &[])
    }

    /// Balance of an account.
    #[must_use]
    pub fn balance(&self, addr: &Address) -> Coins {
        self.state
            .read()
            .balances
            .get(addr)
            .cloned()
            .unwrap_or_default()
    }

    /// Total supply.
    #[must_use]
    pub fn supply(&self) -> Coins {
        self.state.read().supply.clone()
    }

    /// Creates funds in an account.
    pub fn mint(&self, to: &Address, amount: &Coins) -> Result<(), DispatchError> {
        let mut state = self.state.write();
        let balance = state.balances.get(to).cloned().unwrap_or_default();
        let new_balance = balance.checked_add(amount)?;
        let new_supply = state.supply.checked_add(amount)?;
        state.balances.insert(to.clone(), new_balance);
        state.supply = new_supply;
        Ok(())
    }

    /// Moves funds between accounts.
    pub fn send(&self, from: &Address, to: &Address, amount: &Coins) -> Result<(), DispatchError> {
        let mut state = self.state.write();
        let from_balance = state.balances.get(from).cloned().unwrap_or_default();
        let debited = from_balance.checked_sub(amount).map_err(insufficient)?;
        state.balances.insert(from.clone(), debited);
        let to_balance = state.balances.get(to).cloned().unwrap_or_default();
        let credited = to_balance.checked_add(amount)?;
        state.balances.insert(to.clone(), credited);
        debug!(from = %from, to = %to, amount = %amount, "bank transfer");
        Ok(())
    }

    /// Copies the full state.
    #[must_use]
    pub fn snapshot(&self) -> BankSnapshot {
        self.state.read().clone()
    }

    /// Replaces the state with a snapshot.
    pub fn restore(&self, snapshot: BankSnapshot) {
        *self.state.write() = snapshot;
    }

    /// Router handler executing `Send` operations against this bank.
    pub fn send_handler(self: &Arc<Self>) -> OperationHandler {
        let bank = Arc::clone(self);
        Arc::new(
            move |ctx: Context, op: &LedgerOp| -> Result<(Context, OpResponse), DispatchError> {
                let LedgerOp::Send { from, to, amount } = op else {
                    return Err(DispatchError::UnroutableOperation {
                        type_url: op.type_url().to_string(),
                    });
                };
                bank.send(from, to, amount)?;
                let event = Event::new("transfer")
                    .add_attribute("recipient", to.to_string())
                    .add_attribute("sender", from.to_string())
                    .add_attribute("amount", amount.to_string());
                Ok((ctx, OpResponse::with_events(vec![event])))
            },
        )
    }
}

fn insufficient(err: CoinError) -> DispatchError {
    match err {
        CoinError::Insufficient { .. } => DispatchError::InsufficientFunds(err.to_string()),
        other => DispatchError::Coin(other),
    }
}

impl Burner for InMemoryBank {
    fn send_coins_from_account_to_module(
        &self,
        _ctx: &Context,
        from: &Address,
        module: &str,
        amount: &Coins,
    ) -> Result<(), DispatchError> {
        self.send(from, &Self::module_address(module), amount)
    }

    fn burn_coins(&self, _ctx: &Context, module: &str, amount: &Coins) -> Result<(), DispatchError> {
        if !self.burner_modules.contains(module) {
            return Err(DispatchError::OperationFailed {
                type_url: "burn".to_string(),
                reason: format!("module account {module} does not have permissions to burn tokens"),
            });
        }
        let module_addr = Self::module_address(module);
        let mut state = self.state.write();
        let balance = state.balances.get(&module_addr).cloned().unwrap_or_default();
        let debited = balance.checked_sub(amount).map_err(insufficient)?;
        let supply = state.supply.checked_sub(amount).map_err(insufficient)?;
        state.balances.insert(module_addr, debited);
        state.supply = supply;
        Ok(())
    }
}

//! # Fund-Burn Handler
//!
//! Claims `bank.burn` only. Funds move from the contract into the burn
//! module account and are destroyed there. Burns are logged, not emitted as
//! events.

use crate::domain::{convert_coins, BankMsg, ContractMsg, Dispatched, HandlerOutcome, WasmCoin};
use crate::errors::DispatchError;
use crate::ports::{Burner, Messenger};
use shared_types::{Address, Coins, Context};
use std::sync::Arc;
use tracing::info;

/// Destroys contract funds through a burn-eligible module account.
#[derive(Clone)]
pub struct BurnHandler {
    burner: Arc<dyn Burner>,
    module: String,
}

impl BurnHandler {
    /// Creates the handler burning through `module`.
    pub fn new(burner: Arc<dyn Burner>, module: impl Into<String>) -> Self {
        Self {
            burner,
            module: module.into(),
        }
    }

    fn burn_amount(amount: &[WasmCoin]) -> Result<Coins, DispatchError> {
        if amount.is_empty() {
            return Err(DispatchError::InsufficientFunds(
                "burn amount must not be empty".to_string(),
            ));
        }
        for coin in amount {
            if coin.to_coin()?.is_zero() {
                return Err(DispatchError::InsufficientFunds(format!(
                    "burn amount must be positive: 0{}",
                    coin.denom
                )));
            }
        }
        Ok(convert_coins(amount)?)
    }

    fn burn(
        &self,
        ctx: &Context,
        contract: &Address,
        amount: &[WasmCoin],
    ) -> Result<Dispatched, DispatchError> {
        let coins = Self::burn_amount(amount)?;
        self.burner
            .send_coins_from_account_to_module(ctx, contract, &self.module, &coins)?;
        self.burner.burn_coins(ctx, &self.module, &coins)?;
        info!(contract = %contract, amount = %coins, module = %self.module, "Burned");
        Ok(Dispatched::empty(ctx.clone()))
    }
}

impl Messenger for BurnHandler {
    fn dispatch_msg(
        &self,
        ctx: &Context,
        contract: &Address,
        _ibc_port: &str,
        msg: &ContractMsg,
    ) -> HandlerOutcome {
        let ContractMsg::Bank(BankMsg::Burn { amount }) = msg else {
            return HandlerOutcome::NotMine;
        };
        HandlerOutcome::claimed(self.burn(ctx, contract, amount))
    }

    fn name(&self) -> &'static str {
        "burn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryBank;
    use shared_types::{BlockInfo, Coin, GasMeter, U256};

    const MODULE: &str = "burner";

    fn setup(balance: u64) -> (Arc<InMemoryBank>, BurnHandler, Address) {
        let bank = Arc::new(InMemoryBank::new().with_burner_module(MODULE));
        let contract = Address::contract("wasm", 1, 1);
        if balance > 0 {
            bank.mint(
                &contract,
                &Coins::new(vec![Coin::new("ustake", balance)]).unwrap(),
            )
            .unwrap();
        }
        let handler = BurnHandler::new(bank.clone(), MODULE);
        (bank, handler, contract)
    }

    fn ctx() -> Context {
        Context::new(BlockInfo::default(), GasMeter::infinite())
    }

    fn burn_msg(amount: u64) -> ContractMsg {
        ContractMsg::Bank(BankMsg::Burn {
            amount: vec![WasmCoin::new("ustake", amount)],
        })
    }

    #[test]
    fn test_burn_exact_balance_reduces_supply() {
        let (bank, handler, contract) = setup(500);
        let supply_before = bank.supply().amount_of("ustake");

        let outcome = handler.dispatch_msg(&ctx(), &contract, "", &burn_msg(500));
        match outcome {
            HandlerOutcome::Claimed(out) => assert!(out.events.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(bank.balance(&contract).amount_of("ustake"), U256::zero());
        assert_eq!(
            supply_before - bank.supply().amount_of("ustake"),
            U256::from(500)
        );
    }

    #[test]
    fn test_burn_more_than_balance_fails() {
        for (balance, amount) in [(0, 1), (10, 11), (499, 500)] {
            let (bank, handler, contract) = setup(balance);
            let outcome = handler.dispatch_msg(&ctx(), &contract, "", &burn_msg(amount));
            assert!(
                matches!(
                    outcome,
                    HandlerOutcome::Failed(DispatchError::InsufficientFunds(_))
                ),
                "burning {amount} of {balance}"
            );
            assert_eq!(
                bank.balance(&contract).amount_of("ustake"),
                U256::from(balance)
            );
        }
    }

    #[test]
    fn test_zero_or_empty_burn_fails() {
        let (_, handler, contract) = setup(10);
        assert!(matches!(
            handler.dispatch_msg(&ctx(), &contract, "", &burn_msg(0)),
            HandlerOutcome::Failed(DispatchError::InsufficientFunds(_))
        ));
        let empty = ContractMsg::Bank(BankMsg::Burn { amount: vec![] });
        assert!(matches!(
            handler.dispatch_msg(&ctx(), &contract, "", &empty),
            HandlerOutcome::Failed(DispatchError::InsufficientFunds(_))
        ));
    }

    #[test]
    fn test_burner_unknown_msg_is_failure() {
        struct Refusing;
        impl Burner for Refusing {
            fn send_coins_from_account_to_module(
                &self,
                _: &Context,
                _: &Address,
                _: &str,
                _: &Coins,
            ) -> Result<(), DispatchError> {
                Ok(())
            }

            fn burn_coins(&self, _: &Context, _: &str, _: &Coins) -> Result<(), DispatchError> {
                Err(DispatchError::unknown("burn"))
            }
        }

        let handler = BurnHandler::new(Arc::new(Refusing), MODULE);
        let contract = Address::contract("wasm", 1, 1);
        assert!(matches!(
            handler.dispatch_msg(&ctx(), &contract, "", &burn_msg(5)),
            HandlerOutcome::Failed(DispatchError::UnknownMsg(_))
        ));
    }

    #[test]
    fn test_other_messages_declined() {
        let (_, handler, contract) = setup(10);
        let msg = ContractMsg::Bank(BankMsg::Send {
            to_address: "0a".into(),
            amount: vec![WasmCoin::new("ustake", 1)],
        });
        assert!(handler
            .dispatch_msg(&ctx(), &contract, "", &msg)
            .is_not_mine());
    }
}

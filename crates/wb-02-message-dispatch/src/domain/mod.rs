//! # Domain Layer
//!
//! Contract messages, ledger operations, dispatch outcomes and gas pricing.

pub mod gas;
pub mod ledger_ops;
pub mod messages;
pub mod outcome;

pub use gas::GasRegister;
pub use ledger_ops::{LedgerOp, OpResponse};
pub use messages::{
    convert_coins, BankMsg, ContractMsg, DistributionMsg, GovMsg, IbcMsg, MessageKind,
    StakingMsg, VoteOption, WasmCoin, WasmMsg,
};
pub use outcome::{Dispatched, HandlerOutcome};

//! # WB-02 Message Dispatch - Contract Intent Resolution Subsystem
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Contracts cannot touch ledger state. They return abstract messages; this
//! crate resolves each one through an ordered chain of handlers into concrete
//! ledger effects.
//!
//! ## Architecture
//!
//! ```text
//! ContractResponse
//!       │
//!       ▼
//! ContractResponseHandler ── event gas ──► GasRegister
//!       │          └──────── telemetry ──► wb-01 translator
//!       ▼
//! MessageHandlerChain (first claim wins, decline moves on)
//!   ├─ LedgerOperationHandler ─► MessageEncoder ─► OperationRouter
//!   ├─ PacketSendHandler ──────► ChannelKeeper + CapabilityKeeper
//!   └─ BurnHandler ────────────► Burner
//! ```
//!
//! ## Invariants
//!
//! | Rule | Enforcement |
//! |------|-------------|
//! | Only `NotMine` continues the chain | `handlers::chain` |
//! | Unset handler slot is fatal at construction | `MessageHandlerChain::new` |
//! | Every operation signer equals the contract | `handlers::ledger` |
//! | One data slot per executed operation | `LedgerOperationHandler::execute` |
//! | Packet preconditions checked in fixed order | `handlers::packet` |
//! | No rollback of earlier operations | caller-owned checkpoint (`InMemoryBank::snapshot`) |
//!
//! ## Determinism
//!
//! Everything here is synchronous. The context is borrowed in and the
//! updated context is returned inside [`Dispatched`]; handlers never read
//! wall-clock time or randomness.
//!
//! ## Usage Example
//!
//! ```ignore
//! use wb_02_message_dispatch::prelude::*;
//!
//! let chain = default_message_handler(router, encoders, channels, caps, bank, &config);
//! let service = ContractResponseHandler::new(Arc::new(chain), GasRegister::default());
//! let handled = service.handle(&ctx, &contract, &port, &response)?;
//! ```
//!
//! [`Dispatched`]: domain::Dispatched

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod encoders;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{
        BankSnapshot, InMemoryBank, InMemoryCapabilityKeeper, InMemoryChannelKeeper,
        MsgServiceRouter,
    };
    pub use crate::config::{DispatchConfig, GasRegisterConfig};
    pub use crate::domain::{
        convert_coins, BankMsg, ContractMsg, Dispatched, DistributionMsg, GasRegister, GovMsg,
        HandlerOutcome, IbcMsg, LedgerOp, MessageKind, OpResponse, StakingMsg, VoteOption,
        WasmCoin, WasmMsg,
    };
    pub use crate::encoders::{CustomEncoder, MessageEncoders};
    pub use crate::errors::DispatchError;
    pub use crate::handlers::{
        BurnHandler, LedgerOperationHandler, MessageHandlerChain, PacketSendHandler,
    };
    pub use crate::ports::{
        Burner, CapabilityKeeper, ChannelKeeper, MessageEncoder, Messenger, OperationHandler,
        OperationRouter,
    };
    pub use crate::service::{
        default_encoders, default_message_handler, ContractResponse, ContractResponseHandler,
        HandledResponse,
    };
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Message Dispatch";

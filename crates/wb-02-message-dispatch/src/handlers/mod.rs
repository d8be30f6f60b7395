//! # Message Handlers
//!
//! The handler chain and the three built-in handlers, tried in this order by
//! the default chain:
//!
//! 1. [`LedgerOperationHandler`] - encoded host operations
//! 2. [`PacketSendHandler`] - raw packets on contract-owned channels
//! 3. [`BurnHandler`] - fund destruction

pub mod burn;
pub mod chain;
pub mod ledger;
pub mod packet;

pub use burn::BurnHandler;
pub use chain::MessageHandlerChain;
pub use ledger::LedgerOperationHandler;
pub use packet::PacketSendHandler;

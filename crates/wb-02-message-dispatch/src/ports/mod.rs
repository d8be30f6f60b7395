//! # Ports Layer
//!
//! - `inbound`: the API every message handler exposes
//! - `outbound`: host collaborators the handlers drive

pub mod inbound;
pub mod outbound;

pub use inbound::Messenger;
pub use outbound::{
    Burner, CapabilityKeeper, ChannelKeeper, MessageEncoder, OperationHandler, OperationRouter,
};

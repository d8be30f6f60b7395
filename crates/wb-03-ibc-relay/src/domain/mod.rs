//! # Domain Layer

pub mod contract;
pub mod msgs;
pub mod responses;

pub use contract::{Callback, Checksum, ContractInfo, Env};
pub use msgs::{
    IbcChannel, IbcChannelCloseMsg, IbcChannelConnectMsg, IbcChannelOpenMsg, IbcPacketAckMsg,
    IbcPacketReceiveMsg, IbcPacketTimeoutMsg,
};
pub use responses::{
    Acknowledged, IbcBasicResponse, IbcReceiveResponse, IbcReceiveResult, Relayed,
};

//! # Contract Instances and Execution Environment

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Address, BlockInfo, Context};
use std::fmt;

/// SHA-256 of a contract's code.
pub type Checksum = [u8; 32];

/// Registry metadata of a contract instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// Code the instance runs.
    pub code_id: u64,
    /// Account that instantiated it.
    pub creator: Address,
    /// Account allowed to migrate it.
    pub admin: Option<Address>,
    /// Human label.
    pub label: String,
    /// Protocol port bound to the contract, if any.
    pub ibc_port_id: Option<String>,
}

impl ContractInfo {
    /// Bound port, or the empty string.
    #[must_use]
    pub fn port(&self) -> &str {
        self.ibc_port_id.as_deref().unwrap_or_default()
    }
}

/// Execution-environment descriptor handed to the engine.
///
/// Built from the block header only; the engine never sees the local clock.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Env {
    /// Block info.
    pub block: BlockInfo,
    /// Contract being called.
    pub contract: Address,
    /// Code checksum of the contract.
    #[serde_as(as = "Hex")]
    pub checksum: Checksum,
}

impl Env {
    /// Environment for `contract` at the context's block.
    #[must_use]
    pub fn new(ctx: &Context, contract: &Address, checksum: Checksum) -> Self {
        Self {
            block: ctx.block().clone(),
            contract: contract.clone(),
            checksum,
        }
    }
}

/// The six relay callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    /// Handshake init/try.
    OpenChannel,
    /// Handshake ack/confirm.
    ConnectChannel,
    /// Channel closing.
    CloseChannel,
    /// Packet delivery.
    ReceivePacket,
    /// Acknowledgement of a sent packet.
    AckPacket,
    /// Expiry of a sent packet.
    TimeoutPacket,
}

impl Callback {
    /// Short label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenChannel => "open_channel",
            Self::ConnectChannel => "connect_channel",
            Self::CloseChannel => "close_channel",
            Self::ReceivePacket => "receive_packet",
            Self::AckPacket => "ack_packet",
            Self::TimeoutPacket => "timeout_packet",
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::GasMeter;

    #[test]
    fn test_env_uses_block_time() {
        let block = BlockInfo {
            height: 12,
            time: 42,
            chain_id: "test-1".into(),
        };
        let ctx = Context::new(block.clone(), GasMeter::infinite());
        let env = Env::new(&ctx, &Address::new(vec![1]), [7; 32]);
        assert_eq!(env.block, block);
        assert_eq!(env.checksum, [7; 32]);
    }

    #[test]
    fn test_port_fallback() {
        let info = ContractInfo {
            code_id: 1,
            creator: Address::new(vec![1]),
            admin: None,
            label: "demo".into(),
            ibc_port_id: None,
        };
        assert_eq!(info.port(), "");
        assert_eq!(Callback::ReceivePacket.to_string(), "receive_packet");
    }
}

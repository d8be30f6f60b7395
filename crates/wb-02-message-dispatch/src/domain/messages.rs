//! # Contract Messages
//!
//! The closed family of abstract messages a contract may return. The JSON
//! shape is externally tagged and snake_case, e.g.
//! `{"bank":{"send":{"to_address":"..","amount":[..]}}}`.

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Coin, CoinError, Coins, IbcTimeout};
use std::fmt;

// =============================================================================
// COINS
// =============================================================================

/// Coin as written by a contract: the amount is a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmCoin {
    /// Denomination.
    pub denom: String,
    /// Decimal amount.
    pub amount: String,
}

impl WasmCoin {
    /// Creates a contract coin.
    #[must_use]
    pub fn new(denom: impl Into<String>, amount: impl ToString) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }

    /// Converts to a ledger coin. Does not check positivity.
    pub fn to_coin(&self) -> Result<Coin, CoinError> {
        Coin::validate_denom(&self.denom)?;
        Coin::parse(&self.denom, &self.amount)
    }
}

/// Converts and validates a contract coin list.
pub fn convert_coins(coins: &[WasmCoin]) -> Result<Coins, CoinError> {
    let converted = coins
        .iter()
        .map(WasmCoin::to_coin)
        .collect::<Result<Vec<_>, _>>()?;
    Coins::new(converted)
}

// =============================================================================
// MESSAGE FAMILIES
// =============================================================================

/// Abstract message emitted by a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractMsg {
    /// Token movements.
    Bank(BankMsg),
    /// Delegation management.
    Staking(StakingMsg),
    /// Reward management.
    Distribution(DistributionMsg),
    /// Calls into other contracts.
    Wasm(WasmMsg),
    /// Cross-chain messaging.
    Ibc(IbcMsg),
    /// Governance.
    Gov(GovMsg),
    /// Chain-specific payload, only understood by a custom encoder.
    Custom(serde_json::Value),
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankMsg {
    Send {
        to_address: String,
        amount: Vec<WasmCoin>,
    },
    Burn {
        amount: Vec<WasmCoin>,
    },
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakingMsg {
    Delegate {
        validator: String,
        amount: WasmCoin,
    },
    Undelegate {
        validator: String,
        amount: WasmCoin,
    },
    Redelegate {
        src_validator: String,
        dst_validator: String,
        amount: WasmCoin,
    },
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMsg {
    SetWithdrawAddress { address: String },
    WithdrawDelegatorReward { validator: String },
}

/// Contract-to-contract calls. `msg` payloads travel hex encoded.
#[allow(missing_docs)]
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasmMsg {
    Execute {
        contract_addr: String,
        #[serde_as(as = "Hex")]
        msg: Vec<u8>,
        #[serde(default)]
        funds: Vec<WasmCoin>,
    },
    Instantiate {
        admin: Option<String>,
        code_id: u64,
        #[serde_as(as = "Hex")]
        msg: Vec<u8>,
        #[serde(default)]
        funds: Vec<WasmCoin>,
        label: String,
    },
    Migrate {
        contract_addr: String,
        new_code_id: u64,
        #[serde_as(as = "Hex")]
        msg: Vec<u8>,
    },
    UpdateAdmin {
        contract_addr: String,
        admin: String,
    },
    ClearAdmin {
        contract_addr: String,
    },
}

#[allow(missing_docs)]
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IbcMsg {
    /// Fungible token transfer through the host transfer port.
    Transfer {
        channel_id: String,
        to_address: String,
        amount: WasmCoin,
        timeout: IbcTimeout,
    },
    /// Raw packet on a channel owned by the contract.
    SendPacket {
        channel_id: String,
        #[serde_as(as = "Hex")]
        data: Vec<u8>,
        timeout: IbcTimeout,
    },
    /// Start closing a channel owned by the contract.
    CloseChannel { channel_id: String },
}

#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovMsg {
    Vote { proposal_id: u64, vote: VoteOption },
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOption {
    Yes,
    No,
    Abstain,
    NoWithVeto,
}

// =============================================================================
// MESSAGE KIND
// =============================================================================

/// Which handler family a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Encoded into host ledger operations.
    LedgerOperation,
    /// Raw packet submission.
    SendPacket,
    /// Fund destruction.
    Burn,
}

impl MessageKind {
    /// Short label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LedgerOperation => "ledger_operation",
            Self::SendPacket => "send_packet",
            Self::Burn => "burn",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ContractMsg {
    /// Projects the message onto its handler family.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Bank(BankMsg::Burn { .. }) => MessageKind::Burn,
            Self::Ibc(IbcMsg::SendPacket { .. }) => MessageKind::SendPacket,
            _ => MessageKind::LedgerOperation,
        }
    }

    /// Dotted name of the variant, e.g. `bank.send`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bank(BankMsg::Send { .. }) => "bank.send",
            Self::Bank(BankMsg::Burn { .. }) => "bank.burn",
            Self::Staking(StakingMsg::Delegate { .. }) => "staking.delegate",
            Self::Staking(StakingMsg::Undelegate { .. }) => "staking.undelegate",
            Self::Staking(StakingMsg::Redelegate { .. }) => "staking.redelegate",
            Self::Distribution(DistributionMsg::SetWithdrawAddress { .. }) => {
                "distribution.set_withdraw_address"
            }
            Self::Distribution(DistributionMsg::WithdrawDelegatorReward { .. }) => {
                "distribution.withdraw_delegator_reward"
            }
            Self::Wasm(WasmMsg::Execute { .. }) => "wasm.execute",
            Self::Wasm(WasmMsg::Instantiate { .. }) => "wasm.instantiate",
            Self::Wasm(WasmMsg::Migrate { .. }) => "wasm.migrate",
            Self::Wasm(WasmMsg::UpdateAdmin { .. }) => "wasm.update_admin",
            Self::Wasm(WasmMsg::ClearAdmin { .. }) => "wasm.clear_admin",
            Self::Ibc(IbcMsg::Transfer { .. }) => "ibc.transfer",
            Self::Ibc(IbcMsg::SendPacket { .. }) => "ibc.send_packet",
            Self::Ibc(IbcMsg::CloseChannel { .. }) => "ibc.close_channel",
            Self::Gov(GovMsg::Vote { .. }) => "gov.vote",
            Self::Custom(_) => "custom",
        }
    }
}

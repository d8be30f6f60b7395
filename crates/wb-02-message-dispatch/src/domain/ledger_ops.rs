//! # Ledger Operations
//!
//! Concrete host operations produced by the encoders. Each operation can
//! validate itself and names the accounts that must have authorized it.

use super::messages::VoteOption;
use crate::errors::DispatchError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Coin, Coins, Event, IbcTimeout};

/// A host ledger operation.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type", rename_all = "snake_case")]
pub enum LedgerOp {
    Send {
        from: Address,
        to: Address,
        amount: Coins,
    },
    Delegate {
        delegator: Address,
        validator: String,
        amount: Coin,
    },
    Undelegate {
        delegator: Address,
        validator: String,
        amount: Coin,
    },
    BeginRedelegate {
        delegator: Address,
        src_validator: String,
        dst_validator: String,
        amount: Coin,
    },
    SetWithdrawAddress {
        delegator: Address,
        withdraw_address: Address,
    },
    WithdrawDelegatorReward {
        delegator: Address,
        validator: String,
    },
    ExecuteContract {
        sender: Address,
        contract: Address,
        msg: Vec<u8>,
        funds: Coins,
    },
    InstantiateContract {
        sender: Address,
        admin: Option<Address>,
        code_id: u64,
        label: String,
        msg: Vec<u8>,
        funds: Coins,
    },
    MigrateContract {
        sender: Address,
        contract: Address,
        code_id: u64,
        msg: Vec<u8>,
    },
    UpdateAdmin {
        sender: Address,
        contract: Address,
        new_admin: Address,
    },
    ClearAdmin {
        sender: Address,
        contract: Address,
    },
    Transfer {
        source_port: String,
        source_channel: String,
        token: Coin,
        sender: Address,
        receiver: String,
        timeout: IbcTimeout,
    },
    ChannelCloseInit {
        port_id: String,
        channel_id: String,
        signer: Address,
    },
    Vote {
        proposal_id: u64,
        voter: Address,
        option: VoteOption,
    },
    /// Chain-specific operation produced by a custom encoder.
    Custom {
        type_url: String,
        signers: Vec<Address>,
        payload: serde_json::Value,
    },
}

impl LedgerOp {
    /// Routing key of the operation.
    #[must_use]
    pub fn type_url(&self) -> &str {
        match self {
            Self::Send { .. } => "/cosmos.bank.v1beta1.MsgSend",
            Self::Delegate { .. } => "/cosmos.staking.v1beta1.MsgDelegate",
            Self::Undelegate { .. } => "/cosmos.staking.v1beta1.MsgUndelegate",
            Self::BeginRedelegate { .. } => "/cosmos.staking.v1beta1.MsgBeginRedelegate",
            Self::SetWithdrawAddress { .. } => {
                "/cosmos.distribution.v1beta1.MsgSetWithdrawAddress"
            }
            Self::WithdrawDelegatorReward { .. } => {
                "/cosmos.distribution.v1beta1.MsgWithdrawDelegatorReward"
            }
            Self::ExecuteContract { .. } => "/cosmwasm.wasm.v1.MsgExecuteContract",
            Self::InstantiateContract { .. } => "/cosmwasm.wasm.v1.MsgInstantiateContract",
            Self::MigrateContract { .. } => "/cosmwasm.wasm.v1.MsgMigrateContract",
            Self::UpdateAdmin { .. } => "/cosmwasm.wasm.v1.MsgUpdateAdmin",
            Self::ClearAdmin { .. } => "/cosmwasm.wasm.v1.MsgClearAdmin",
            Self::Transfer { .. } => "/ibc.applications.transfer.v1.MsgTransfer",
            Self::ChannelCloseInit { .. } => "/ibc.core.channel.v1.MsgChannelCloseInit",
            Self::Vote { .. } => "/cosmos.gov.v1beta1.MsgVote",
            Self::Custom { type_url, .. } => type_url,
        }
    }

    /// Accounts that must have authorized this operation.
    #[must_use]
    pub fn signers(&self) -> Vec<&Address> {
        match self {
            Self::Send { from, .. } => vec![from],
            Self::Delegate { delegator, .. }
            | Self::Undelegate { delegator, .. }
            | Self::BeginRedelegate { delegator, .. }
            | Self::SetWithdrawAddress { delegator, .. }
            | Self::WithdrawDelegatorReward { delegator, .. } => vec![delegator],
            Self::ExecuteContract { sender, .. }
            | Self::InstantiateContract { sender, .. }
            | Self::MigrateContract { sender, .. }
            | Self::UpdateAdmin { sender, .. }
            | Self::ClearAdmin { sender, .. }
            | Self::Transfer { sender, .. } => vec![sender],
            Self::ChannelCloseInit { signer, .. } => vec![signer],
            Self::Vote { voter, .. } => vec![voter],
            Self::Custom { signers, .. } => signers.iter().collect(),
        }
    }

    /// Stateless self-validation.
    pub fn validate_basic(&self) -> Result<(), DispatchError> {
        for signer in self.signers() {
            if signer.is_empty() {
                return invalid(self, "empty signer");
            }
        }
        match self {
            Self::Send { to, amount, .. } => {
                if to.is_empty() {
                    return invalid(self, "empty recipient");
                }
                if amount.is_empty() {
                    return invalid(self, "no coins to send");
                }
            }
            Self::Delegate {
                validator, amount, ..
            }
            | Self::Undelegate {
                validator, amount, ..
            } => {
                require_validator(self, validator)?;
                require_positive(amount)?;
            }
            Self::BeginRedelegate {
                src_validator,
                dst_validator,
                amount,
                ..
            } => {
                require_validator(self, src_validator)?;
                require_validator(self, dst_validator)?;
                if src_validator == dst_validator {
                    return invalid(self, "redelegation to the same validator");
                }
                require_positive(amount)?;
            }
            Self::SetWithdrawAddress {
                withdraw_address, ..
            } => {
                if withdraw_address.is_empty() {
                    return invalid(self, "empty withdraw address");
                }
            }
            Self::WithdrawDelegatorReward { validator, .. } => {
                require_validator(self, validator)?;
            }
            Self::ExecuteContract { contract, msg, .. } => {
                if contract.is_empty() {
                    return invalid(self, "empty contract address");
                }
                require_json(self, msg)?;
            }
            Self::InstantiateContract {
                code_id,
                label,
                msg,
                ..
            } => {
                if *code_id == 0 {
                    return invalid(self, "code id is required");
                }
                if label.trim().is_empty() {
                    return invalid(self, "label is required");
                }
                require_json(self, msg)?;
            }
            Self::MigrateContract {
                contract,
                code_id,
                msg,
                ..
            } => {
                if contract.is_empty() || *code_id == 0 {
                    return invalid(self, "contract and code id are required");
                }
                require_json(self, msg)?;
            }
            Self::UpdateAdmin {
                contract,
                new_admin,
                ..
            } => {
                if contract.is_empty() || new_admin.is_empty() {
                    return invalid(self, "contract and new admin are required");
                }
            }
            Self::ClearAdmin { contract, .. } => {
                if contract.is_empty() {
                    return invalid(self, "empty contract address");
                }
            }
            Self::Transfer {
                source_port,
                source_channel,
                token,
                receiver,
                timeout,
                ..
            } => {
                if source_port.is_empty() || source_channel.is_empty() {
                    return invalid(self, "source port and channel are required");
                }
                require_positive(token)?;
                if receiver.trim().is_empty() {
                    return invalid(self, "empty receiver");
                }
                if !timeout.is_set() {
                    return invalid(self, "timeout height or timestamp is required");
                }
            }
            Self::ChannelCloseInit {
                port_id,
                channel_id,
                ..
            } => {
                if port_id.is_empty() || channel_id.is_empty() {
                    return invalid(self, "port and channel are required");
                }
            }
            Self::Vote { proposal_id, .. } => {
                if *proposal_id == 0 {
                    return invalid(self, "proposal id is required");
                }
            }
            Self::Custom { type_url, .. } => {
                if type_url.is_empty() {
                    return invalid(self, "empty type url");
                }
            }
        }
        Ok(())
    }
}

fn invalid(op: &LedgerOp, reason: &str) -> Result<(), DispatchError> {
    Err(DispatchError::InvalidMsg(format!("{}: {reason}", op.type_url())))
}

fn require_validator(op: &LedgerOp, validator: &str) -> Result<(), DispatchError> {
    if validator.trim().is_empty() {
        return invalid(op, "empty validator address");
    }
    Ok(())
}

fn require_positive(coin: &Coin) -> Result<(), DispatchError> {
    Coin::validate_denom(&coin.denom)?;
    if coin.is_zero() {
        return Err(shared_types::CoinError::NotPositive {
            denom: coin.denom.clone(),
        }
        .into());
    }
    Ok(())
}

fn require_json(op: &LedgerOp, msg: &[u8]) -> Result<(), DispatchError> {
    if serde_json::from_slice::<serde_json::Value>(msg).is_err() {
        return invalid(op, "msg is not valid json");
    }
    Ok(())
}

/// Result of executing one operation on the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpResponse {
    /// Events emitted by the host module.
    pub events: Vec<Event>,
    /// Opaque result bytes.
    pub data: Vec<u8>,
}

impl OpResponse {
    /// Response with events and no data.
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events,
            data: Vec::new(),
        }
    }
}

//! # Message Encoders
//!
//! One encoding function per message family. Bank burns and raw packet sends
//! are declined here: dedicated handlers further down the chain claim them.

use crate::config::DispatchConfig;
use crate::domain::{
    convert_coins, BankMsg, ContractMsg, DistributionMsg, GovMsg, IbcMsg, LedgerOp, StakingMsg,
    WasmMsg,
};
use crate::errors::DispatchError;
use crate::ports::MessageEncoder;
use shared_types::{port_id_for_contract, Address};
use std::sync::Arc;

/// Encoder hook for chain-specific `custom` payloads.
pub type CustomEncoder = Arc<
    dyn Fn(&Address, &serde_json::Value) -> Result<Vec<LedgerOp>, DispatchError> + Send + Sync,
>;

/// Default encoder set.
#[derive(Clone, Default)]
pub struct MessageEncoders {
    config: DispatchConfig,
    custom: Option<CustomEncoder>,
}

impl std::fmt::Debug for MessageEncoders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageEncoders")
            .field("config", &self.config)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl MessageEncoders {
    /// Encoders without a custom hook.
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            custom: None,
        }
    }

    /// Installs the custom payload encoder.
    #[must_use]
    pub fn with_custom(mut self, encoder: CustomEncoder) -> Self {
        self.custom = Some(encoder);
        self
    }

    fn encode_bank(sender: &Address, msg: &BankMsg) -> Result<Vec<LedgerOp>, DispatchError> {
        match msg {
            BankMsg::Send { to_address, amount } => Ok(vec![LedgerOp::Send {
                from: sender.clone(),
                to: Address::from_hex(to_address)?,
                amount: convert_coins(amount)?,
            }]),
            BankMsg::Burn { .. } => Err(DispatchError::unknown("bank.burn")),
        }
    }

    fn encode_staking(sender: &Address, msg: &StakingMsg) -> Result<Vec<LedgerOp>, DispatchError> {
        let op = match msg {
            StakingMsg::Delegate { validator, amount } => LedgerOp::Delegate {
                delegator: sender.clone(),
                validator: validator.clone(),
                amount: amount.to_coin()?,
            },
            StakingMsg::Undelegate { validator, amount } => LedgerOp::Undelegate {
                delegator: sender.clone(),
                validator: validator.clone(),
                amount: amount.to_coin()?,
            },
            StakingMsg::Redelegate {
                src_validator,
                dst_validator,
                amount,
            } => LedgerOp::BeginRedelegate {
                delegator: sender.clone(),
                src_validator: src_validator.clone(),
                dst_validator: dst_validator.clone(),
                amount: amount.to_coin()?,
            },
        };
        Ok(vec![op])
    }

    fn encode_distribution(
        sender: &Address,
        msg: &DistributionMsg,
    ) -> Result<Vec<LedgerOp>, DispatchError> {
        let op = match msg {
            DistributionMsg::SetWithdrawAddress { address } => LedgerOp::SetWithdrawAddress {
                delegator: sender.clone(),
                withdraw_address: Address::from_hex(address)?,
            },
            DistributionMsg::WithdrawDelegatorReward { validator } => {
                LedgerOp::WithdrawDelegatorReward {
                    delegator: sender.clone(),
                    validator: validator.clone(),
                }
            }
        };
        Ok(vec![op])
    }

    fn encode_wasm(sender: &Address, msg: &WasmMsg) -> Result<Vec<LedgerOp>, DispatchError> {
        let op = match msg {
            WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            } => LedgerOp::ExecuteContract {
                sender: sender.clone(),
                contract: Address::from_hex(contract_addr)?,
                msg: msg.clone(),
                funds: convert_coins(funds)?,
            },
            WasmMsg::Instantiate {
                admin,
                code_id,
                msg,
                funds,
                label,
            } => LedgerOp::InstantiateContract {
                sender: sender.clone(),
                admin: admin.as_deref().map(Address::from_hex).transpose()?,
                code_id: *code_id,
                label: label.clone(),
                msg: msg.clone(),
                funds: convert_coins(funds)?,
            },
            WasmMsg::Migrate {
                contract_addr,
                new_code_id,
                msg,
            } => LedgerOp::MigrateContract {
                sender: sender.clone(),
                contract: Address::from_hex(contract_addr)?,
                code_id: *new_code_id,
                msg: msg.clone(),
            },
            WasmMsg::UpdateAdmin {
                contract_addr,
                admin,
            } => LedgerOp::UpdateAdmin {
                sender: sender.clone(),
                contract: Address::from_hex(contract_addr)?,
                new_admin: Address::from_hex(admin)?,
            },
            WasmMsg::ClearAdmin { contract_addr } => LedgerOp::ClearAdmin {
                sender: sender.clone(),
                contract: Address::from_hex(contract_addr)?,
            },
        };
        Ok(vec![op])
    }

    fn encode_ibc(&self, sender: &Address, msg: &IbcMsg) -> Result<Vec<LedgerOp>, DispatchError> {
        match msg {
            IbcMsg::Transfer {
                channel_id,
                to_address,
                amount,
                timeout,
            } => Ok(vec![LedgerOp::Transfer {
                source_port: self.config.transfer_port.clone(),
                source_channel: channel_id.clone(),
                token: amount.to_coin()?,
                sender: sender.clone(),
                receiver: to_address.clone(),
                timeout: *timeout,
            }]),
            IbcMsg::CloseChannel { channel_id } => Ok(vec![LedgerOp::ChannelCloseInit {
                port_id: port_id_for_contract(sender),
                channel_id: channel_id.clone(),
                signer: sender.clone(),
            }]),
            IbcMsg::SendPacket { .. } => Err(DispatchError::unknown("ibc.send_packet")),
        }
    }

    fn encode_gov(sender: &Address, msg: &GovMsg) -> Vec<LedgerOp> {
        match msg {
            GovMsg::Vote { proposal_id, vote } => vec![LedgerOp::Vote {
                proposal_id: *proposal_id,
                voter: sender.clone(),
                option: *vote,
            }],
        }
    }
}

impl MessageEncoder for MessageEncoders {
    fn encode(
        &self,
        contract: &Address,
        _ibc_port: &str,
        msg: &ContractMsg,
    ) -> Result<Vec<LedgerOp>, DispatchError> {
        match msg {
            ContractMsg::Bank(m) => Self::encode_bank(contract, m),
            ContractMsg::Staking(m) => Self::encode_staking(contract, m),
            ContractMsg::Distribution(m) => Self::encode_distribution(contract, m),
            ContractMsg::Wasm(m) => Self::encode_wasm(contract, m),
            ContractMsg::Ibc(m) => self.encode_ibc(contract, m),
            ContractMsg::Gov(m) => Ok(Self::encode_gov(contract, m)),
            ContractMsg::Custom(payload) => match &self.custom {
                Some(encoder) => encoder(contract, payload),
                None => Err(DispatchError::unknown("custom")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{VoteOption, WasmCoin};
    use shared_types::{IbcTimeout, U256};

    fn contract() -> Address {
        Address::contract("wasm", 1, 1)
    }

    fn encode(msg: &ContractMsg) -> Result<Vec<LedgerOp>, DispatchError> {
        MessageEncoders::default().encode(&contract(), "", msg)
    }

    #[test]
    fn test_bank_send_uses_contract_as_sender() {
        let rcpt = Address::new(vec![7; 20]);
        let ops = encode(&ContractMsg::Bank(BankMsg::Send {
            to_address: rcpt.to_hex(),
            amount: vec![WasmCoin::new("ustake", 100)],
        }))
        .unwrap();
        match &ops[..] {
            [LedgerOp::Send { from, to, amount }] => {
                assert_eq!(from, &contract());
                assert_eq!(to, &rcpt);
                assert_eq!(amount.amount_of("ustake"), U256::from(100));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_burn_and_send_packet_decline() {
        let burn = ContractMsg::Bank(BankMsg::Burn {
            amount: vec![WasmCoin::new("ustake", 1)],
        });
        assert!(encode(&burn).unwrap_err().is_decline());

        let packet = ContractMsg::Ibc(IbcMsg::SendPacket {
            channel_id: "channel-0".into(),
            data: vec![1],
            timeout: IbcTimeout::at_timestamp(1),
        });
        assert!(encode(&packet).unwrap_err().is_decline());
    }

    #[test]
    fn test_custom_without_hook_declines() {
        let msg = ContractMsg::Custom(serde_json::json!({"mint": {}}));
        assert!(encode(&msg).unwrap_err().is_decline());
    }

    #[test]
    fn test_custom_hook() {
        let encoders = MessageEncoders::default().with_custom(Arc::new(|sender, payload| {
            Ok(vec![LedgerOp::Custom {
                type_url: "/chain.mint.MsgMint".into(),
                signers: vec![sender.clone()],
                payload: payload.clone(),
            }])
        }));
        let msg = ContractMsg::Custom(serde_json::json!({"mint": {"amount": "5"}}));
        let ops = encoders.encode(&contract(), "", &msg).unwrap();
        assert_eq!(ops[0].type_url(), "/chain.mint.MsgMint");
    }

    #[test]
    fn test_bad_address_is_validation_not_decline() {
        let err = encode(&ContractMsg::Bank(BankMsg::Send {
            to_address: "zz-not-hex".into(),
            amount: vec![WasmCoin::new("ustake", 1)],
        }))
        .unwrap_err();
        assert!(matches!(err, DispatchError::Address(_)));
    }

    #[test]
    fn test_ibc_transfer_uses_transfer_port() {
        let ops = encode(&ContractMsg::Ibc(IbcMsg::Transfer {
            channel_id: "channel-9".into(),
            to_address: "cosmos1abc".into(),
            amount: WasmCoin::new("ustake", 3),
            timeout: IbcTimeout::at_height(1, 500),
        }))
        .unwrap();
        assert!(matches!(
            &ops[0],
            LedgerOp::Transfer { source_port, source_channel, .. }
                if source_port == "transfer" && source_channel == "channel-9"
        ));
    }

    #[test]
    fn test_close_channel_uses_contract_port() {
        let ops = encode(&ContractMsg::Ibc(IbcMsg::CloseChannel {
            channel_id: "channel-2".into(),
        }))
        .unwrap();
        assert!(matches!(
            &ops[0],
            LedgerOp::ChannelCloseInit { port_id, .. } if *port_id == port_id_for_contract(&contract())
        ));
    }

    #[test]
    fn test_gov_vote() {
        let ops = encode(&ContractMsg::Gov(GovMsg::Vote {
            proposal_id: 4,
            vote: VoteOption::NoWithVeto,
        }))
        .unwrap();
        assert_eq!(ops[0].signers(), vec![&contract()]);
    }
}

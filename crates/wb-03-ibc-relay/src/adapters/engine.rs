//! Scriptable execution engine.
//!
//! Each protocol entry point can be given a closure; unset entry points
//! answer with an empty success. Every call burns a fixed amount of engine
//! gas, and a call whose budget is smaller fails the way a metered engine
//! does: with the whole budget reported as used.

use crate::domain::{
    Callback, Checksum, Env, IbcBasicResponse, IbcChannelCloseMsg, IbcChannelConnectMsg,
    IbcChannelOpenMsg, IbcPacketAckMsg, IbcPacketReceiveMsg, IbcPacketTimeoutMsg,
    IbcReceiveResponse, IbcReceiveResult,
};
use crate::errors::EngineError;
use crate::ports::{AddressApi, EngineOutput, KvStore, WasmEngine};
use parking_lot::Mutex;
use shared_types::Address;
use std::fmt;
use std::sync::Arc;

type Entry<M, T> = Arc<dyn Fn(&Env, &M, &dyn KvStore) -> Result<T, String> + Send + Sync>;

/// Engine double driven by closures.
#[derive(Default)]
pub struct MockWasmEngine {
    gas_used: u64,
    open: Option<Entry<IbcChannelOpenMsg, Option<String>>>,
    connect: Option<Entry<IbcChannelConnectMsg, IbcBasicResponse>>,
    close: Option<Entry<IbcChannelCloseMsg, IbcBasicResponse>>,
    receive: Option<Entry<IbcPacketReceiveMsg, IbcReceiveResult>>,
    ack: Option<Entry<IbcPacketAckMsg, IbcBasicResponse>>,
    timeout: Option<Entry<IbcPacketTimeoutMsg, IbcBasicResponse>>,
    calls: Mutex<Vec<(Callback, Address)>>,
}

impl fmt::Debug for MockWasmEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockWasmEngine")
            .field("gas_used", &self.gas_used)
            .field("calls", &self.calls.lock().len())
            .finish_non_exhaustive()
    }
}

macro_rules! entry_setter {
    ($(#[$doc:meta])* $name:ident, $field:ident, $msg:ty, $out:ty) => {
        $(#[$doc])*
        #[must_use]
        pub fn $name<F>(mut self, f: F) -> Self
        where
            F: Fn(&Env, &$msg, &dyn KvStore) -> Result<$out, String> + Send + Sync + 'static,
        {
            self.$field = Some(Arc::new(f));
            self
        }
    };
}

impl MockWasmEngine {
    /// Engine that accepts everything and burns no gas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine gas burned per call.
    #[must_use]
    pub fn with_gas_used(mut self, gas_used: u64) -> Self {
        self.gas_used = gas_used;
        self
    }

    entry_setter!(
        /// Scripts handshake init/try.
        on_open, open, IbcChannelOpenMsg, Option<String>
    );
    entry_setter!(
        /// Scripts handshake ack/confirm.
        on_connect, connect, IbcChannelConnectMsg, IbcBasicResponse
    );
    entry_setter!(
        /// Scripts channel close.
        on_close, close, IbcChannelCloseMsg, IbcBasicResponse
    );
    entry_setter!(
        /// Scripts packet receipt.
        on_receive, receive, IbcPacketReceiveMsg, IbcReceiveResult
    );
    entry_setter!(
        /// Scripts acknowledgements.
        on_ack, ack, IbcPacketAckMsg, IbcBasicResponse
    );
    entry_setter!(
        /// Scripts timeouts.
        on_timeout, timeout, IbcPacketTimeoutMsg, IbcBasicResponse
    );

    /// Entry points called so far, with the contract they ran for.
    #[must_use]
    pub fn calls(&self) -> Vec<(Callback, Address)> {
        self.calls.lock().clone()
    }

    #[allow(clippy::too_many_arguments)]
    fn run<M, T>(
        &self,
        callback: Callback,
        entry: Option<&Entry<M, T>>,
        fallback: impl FnOnce() -> T,
        env: &Env,
        msg: &M,
        store: &dyn KvStore,
        gas_limit: u64,
    ) -> EngineOutput<T> {
        self.calls.lock().push((callback, env.contract.clone()));
        if self.gas_used > gas_limit {
            return EngineOutput::err(format!("out of gas: budget {gas_limit}"), gas_limit);
        }
        let result = match entry {
            Some(f) => f(env, msg, store).map_err(EngineError::new),
            None => Ok(fallback()),
        };
        EngineOutput {
            result,
            gas_used: self.gas_used,
        }
    }
}

impl WasmEngine for MockWasmEngine {
    fn ibc_channel_open(
        &self,
        _checksum: &Checksum,
        env: &Env,
        msg: &IbcChannelOpenMsg,
        store: &dyn KvStore,
        _api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<Option<String>> {
        self.run(Callback::OpenChannel, self.open.as_ref(), || None, env, msg, store, gas_limit)
    }

    fn ibc_channel_connect(
        &self,
        _checksum: &Checksum,
        env: &Env,
        msg: &IbcChannelConnectMsg,
        store: &dyn KvStore,
        _api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcBasicResponse> {
        self.run(
            Callback::ConnectChannel,
            self.connect.as_ref(),
            IbcBasicResponse::default,
            env,
            msg,
            store,
            gas_limit,
        )
    }

    fn ibc_channel_close(
        &self,
        _checksum: &Checksum,
        env: &Env,
        msg: &IbcChannelCloseMsg,
        store: &dyn KvStore,
        _api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcBasicResponse> {
        self.run(
            Callback::CloseChannel,
            self.close.as_ref(),
            IbcBasicResponse::default,
            env,
            msg,
            store,
            gas_limit,
        )
    }

    fn ibc_packet_receive(
        &self,
        _checksum: &Checksum,
        env: &Env,
        msg: &IbcPacketReceiveMsg,
        store: &dyn KvStore,
        _api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcReceiveResult> {
        self.run(
            Callback::ReceivePacket,
            self.receive.as_ref(),
            || IbcReceiveResult::Ok(IbcReceiveResponse::default()),
            env,
            msg,
            store,
            gas_limit,
        )
    }

    fn ibc_packet_ack(
        &self,
        _checksum: &Checksum,
        env: &Env,
        msg: &IbcPacketAckMsg,
        store: &dyn KvStore,
        _api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcBasicResponse> {
        self.run(
            Callback::AckPacket,
            self.ack.as_ref(),
            IbcBasicResponse::default,
            env,
            msg,
            store,
            gas_limit,
        )
    }

    fn ibc_packet_timeout(
        &self,
        _checksum: &Checksum,
        env: &Env,
        msg: &IbcPacketTimeoutMsg,
        store: &dyn KvStore,
        _api: &dyn AddressApi,
        gas_limit: u64,
    ) -> EngineOutput<IbcBasicResponse> {
        self.run(
            Callback::TimeoutPacket,
            self.timeout.as_ref(),
            IbcBasicResponse::default,
            env,
            msg,
            store,
            gas_limit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{HexAddressApi, InMemoryKvStore};
    use shared_types::{BlockInfo, ChannelOrder, Context, GasMeter, IbcEndpoint};
    use crate::domain::IbcChannel;

    fn env() -> Env {
        let ctx = Context::new(BlockInfo::default(), GasMeter::infinite());
        Env::new(&ctx, &Address::contract("wasm", 1, 1), [0; 32])
    }

    fn open_msg() -> IbcChannelOpenMsg {
        IbcChannelOpenMsg::OpenInit {
            channel: IbcChannel {
                endpoint: IbcEndpoint::new("wasm.aa", "channel-0"),
                counterparty_endpoint: IbcEndpoint::new("transfer", ""),
                order: ChannelOrder::Ordered,
                version: "v1".into(),
                connection_id: "connection-0".into(),
            },
        }
    }

    #[test]
    fn test_scripted_entry_sees_store() {
        let engine = MockWasmEngine::new().with_gas_used(40).on_open(|_, msg, store| {
            store.set(b"version", msg.channel().version.as_bytes());
            Ok(Some("v2".into()))
        });
        let store = InMemoryKvStore::new();
        let out = engine.ibc_channel_open(&[0; 32], &env(), &open_msg(), &store, &HexAddressApi, 100);
        assert_eq!(out.result, Ok(Some("v2".into())));
        assert_eq!(out.gas_used, 40);
        assert_eq!(store.get(b"version"), Some(b"v1".to_vec()));
        assert_eq!(engine.calls()[0].0, Callback::OpenChannel);
    }

    #[test]
    fn test_budget_exceeded_reports_whole_budget() {
        let engine = MockWasmEngine::new().with_gas_used(500);
        let store = InMemoryKvStore::new();
        let out = engine.ibc_channel_open(&[0; 32], &env(), &open_msg(), &store, &HexAddressApi, 100);
        assert!(out.result.is_err());
        assert_eq!(out.gas_used, 100);
    }
}

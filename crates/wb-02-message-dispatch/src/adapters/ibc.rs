//! In-memory channel registry and capability registry.

use crate::errors::DispatchError;
use crate::ports::{CapabilityKeeper, ChannelKeeper};
use parking_lot::RwLock;
use shared_types::{Capability, ChannelInfo, ChannelState, Context, Packet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

type ChannelKey = (String, String);

fn key(port_id: &str, channel_id: &str) -> ChannelKey {
    (port_id.to_string(), channel_id.to_string())
}

#[derive(Debug, Clone)]
struct ChannelEntry {
    info: ChannelInfo,
    next_sequence_send: u64,
    owner: Capability,
}

/// Channel/packet registry kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryChannelKeeper {
    channels: RwLock<HashMap<ChannelKey, ChannelEntry>>,
    sent: RwLock<Vec<Packet>>,
}

impl InMemoryChannelKeeper {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel owned by the holder of `owner`. Sequences start at 1.
    pub fn open_channel(
        &self,
        port_id: &str,
        channel_id: &str,
        info: ChannelInfo,
        owner: Capability,
    ) {
        self.channels.write().insert(
            key(port_id, channel_id),
            ChannelEntry {
                info,
                next_sequence_send: 1,
                owner,
            },
        );
    }

    /// Marks a channel closed. Closed channels never reopen.
    pub fn close_channel(&self, port_id: &str, channel_id: &str) -> bool {
        match self.channels.write().get_mut(&key(port_id, channel_id)) {
            Some(entry) => {
                entry.info.state = ChannelState::Closed;
                true
            }
            None => false,
        }
    }

    /// Packets submitted so far, in order.
    #[must_use]
    pub fn sent_packets(&self) -> Vec<Packet> {
        self.sent.read().clone()
    }
}

impl ChannelKeeper for InMemoryChannelKeeper {
    fn next_sequence_send(&self, _ctx: &Context, port_id: &str, channel_id: &str) -> Option<u64> {
        self.channels
            .read()
            .get(&key(port_id, channel_id))
            .map(|entry| entry.next_sequence_send)
    }

    fn get_channel(&self, _ctx: &Context, port_id: &str, channel_id: &str) -> Option<ChannelInfo> {
        self.channels
            .read()
            .get(&key(port_id, channel_id))
            .map(|entry| entry.info.clone())
    }

    fn send_packet(
        &self,
        _ctx: &Context,
        capability: &Capability,
        packet: Packet,
    ) -> Result<(), DispatchError> {
        let fail = |reason: String| DispatchError::OperationFailed {
            type_url: "send_packet".to_string(),
            reason,
        };
        let mut channels = self.channels.write();
        let entry = channels
            .get_mut(&key(&packet.source.port_id, &packet.source.channel_id))
            .ok_or_else(|| fail("channel not found".to_string()))?;
        if entry.owner != *capability {
            return Err(fail("caller does not own the channel capability".to_string()));
        }
        if entry.info.state != ChannelState::Open {
            return Err(fail(format!("channel is {:?}, not open", entry.info.state)));
        }
        if packet.sequence != entry.next_sequence_send {
            return Err(fail(format!(
                "packet sequence {} != next send sequence {}",
                packet.sequence, entry.next_sequence_send
            )));
        }
        if !packet.timeout.is_set() {
            return Err(fail("packet timeout is not set".to_string()));
        }
        entry.next_sequence_send += 1;
        debug!(
            port = %packet.source.port_id,
            channel = %packet.source.channel_id,
            sequence = packet.sequence,
            "packet sent"
        );
        self.sent.write().push(packet);
        Ok(())
    }
}

/// Capability registry kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCapabilityKeeper {
    next_index: AtomicU64,
    owned: RwLock<HashMap<String, Capability>>,
}

impl InMemoryCapabilityKeeper {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a capability for `path` and records it as held.
    pub fn claim(&self, path: &str) -> Capability {
        let capability = Capability::new(self.next_index.fetch_add(1, Ordering::SeqCst) + 1);
        self.owned
            .write()
            .insert(path.to_string(), capability.clone());
        capability
    }

    /// Drops the capability held for `path`.
    pub fn release(&self, path: &str) -> Option<Capability> {
        self.owned.write().remove(path)
    }
}

impl CapabilityKeeper for InMemoryCapabilityKeeper {
    fn get_capability(&self, _ctx: &Context, path: &str) -> Option<Capability> {
        self.owned.read().get(path).cloned()
    }
}

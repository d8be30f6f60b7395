//! Contract registry, storage and address API kept in process memory.

use crate::domain::{Checksum, ContractInfo};
use crate::ports::{AddressApi, ContractInstance, ContractRegistry, KvStore};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use shared_types::{Address, Context};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// SHA-256 of contract code.
#[must_use]
pub fn code_checksum(code: &[u8]) -> Checksum {
    Sha256::digest(code).into()
}

/// Ordered key/value storage of one contract.
#[derive(Debug, Default)]
pub struct InMemoryKvStore {
    entries: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryKvStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KvStore for InMemoryKvStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &[u8], value: &[u8]) {
        self.entries.write().insert(key.to_vec(), value.to_vec());
    }

    fn remove(&self, key: &[u8]) {
        self.entries.write().remove(key);
    }
}

/// Hex address codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressApi;

impl AddressApi for HexAddressApi {
    fn canonicalize(&self, human: &str) -> Result<Address, String> {
        Address::from_hex(human).map_err(|err| err.to_string())
    }

    fn humanize(&self, canonical: &Address) -> String {
        canonical.to_hex()
    }
}

/// Contract registry kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryContractRegistry {
    contracts: RwLock<HashMap<Address, ContractInstance>>,
}

impl InMemoryContractRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a contract running `code` with fresh storage.
    pub fn register(&self, address: Address, info: ContractInfo, code: &[u8]) -> ContractInstance {
        let instance = ContractInstance {
            info,
            checksum: code_checksum(code),
            store: Arc::new(InMemoryKvStore::new()),
        };
        debug!(
            contract = %address,
            code_id = instance.info.code_id,
            checksum = %hex::encode(instance.checksum),
            "registered contract"
        );
        self.contracts.write().insert(address, instance.clone());
        instance
    }

    /// Removes a contract.
    pub fn remove(&self, address: &Address) -> Option<ContractInstance> {
        self.contracts.write().remove(address)
    }
}

impl ContractRegistry for InMemoryContractRegistry {
    fn contract(&self, _ctx: &Context, address: &Address) -> Option<ContractInstance> {
        self.contracts.read().get(address).cloned()
    }
}

//! # Core Ledger Entities
//!
//! ## Clusters
//!
//! - **Accounts**: [`Address`]
//! - **Funds**: [`Coin`], [`Coins`]
//! - **Telemetry**: [`Event`], [`Attribute`]

use crate::errors::{AddressError, CoinError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// Canonical account address.
///
/// Length is not fixed: user accounts are usually 20 bytes, contract and
/// module accounts 32 bytes. The human-readable form is lowercase hex.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(Vec<u8>);

impl Address {
    /// Length of module-derived addresses.
    pub const MODULE_ADDRESS_LEN: usize = 32;

    /// Wraps raw canonical bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parses the human-readable (hex) form.
    pub fn from_hex(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }
        let bytes = hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed)).map_err(|e| {
            AddressError::InvalidHex {
                input: input.to_string(),
                reason: e.to_string(),
            }
        })?;
        if bytes.is_empty() {
            return Err(AddressError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Derives the account address owned by a module.
    ///
    /// `sha256(module || 0x00 || seed)`. An empty seed yields the module's
    /// own account (e.g. the burn account).
    #[must_use]
    pub fn module(module: &str, seed: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(module.as_bytes());
        hasher.update([0u8]);
        hasher.update(seed);
        Self(hasher.finalize().to_vec())
    }

    /// Builds the address of a contract instance from its code id and the
    /// global instance counter.
    #[must_use]
    pub fn contract(module: &str, code_id: u64, instance_id: u64) -> Self {
        let mut seed = [0u8; 16];
        seed[..8].copy_from_slice(&code_id.to_be_bytes());
        seed[8..].copy_from_slice(&instance_id.to_be_bytes());
        Self::module(module, &seed)
    }

    /// Returns the canonical bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns true for the empty address.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Vec<u8>> for Address {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// CLUSTER B: FUNDS
// =============================================================================

/// Serializes a U256 as a base-10 string, the way contracts write amounts.
pub mod u256_dec {
    use super::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as decimal string.
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserialize from decimal string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_dec_str(&s).map_err(|e| serde::de::Error::custom(format!("{e:?}")))
    }
}

/// A single denomination and amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination, e.g. `ustake`.
    pub denom: String,
    /// Amount in base units.
    #[serde(with = "u256_dec")]
    pub amount: U256,
}

impl Coin {
    /// Creates a coin without validating it.
    #[must_use]
    pub fn new(denom: impl Into<String>, amount: impl Into<U256>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Parses a decimal amount string.
    pub fn parse(denom: &str, amount: &str) -> Result<Self, CoinError> {
        let trimmed = amount.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoinError::InvalidAmount {
                denom: denom.to_string(),
                amount: amount.to_string(),
            });
        }
        let value = U256::from_dec_str(trimmed).map_err(|_| CoinError::InvalidAmount {
            denom: denom.to_string(),
            amount: amount.to_string(),
        })?;
        Ok(Self::new(denom, value))
    }

    /// Checks the denom against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
    pub fn validate_denom(denom: &str) -> Result<(), CoinError> {
        let mut chars = denom.chars();
        let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
        let rest_ok = chars.all(|c| c.is_ascii_alphanumeric() || "/:._-".contains(c));
        if !first_ok || !rest_ok || !(3..=128).contains(&denom.len()) {
            return Err(CoinError::InvalidDenom(denom.to_string()));
        }
        Ok(())
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A validated set of coins: sorted by denom, unique, all positive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// The empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Sorts and validates a list of coins.
    pub fn new(mut coins: Vec<Coin>) -> Result<Self, CoinError> {
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        for (i, coin) in coins.iter().enumerate() {
            Coin::validate_denom(&coin.denom)?;
            if coin.is_zero() {
                return Err(CoinError::NotPositive {
                    denom: coin.denom.clone(),
                });
            }
            if i > 0 && coins[i - 1].denom == coin.denom {
                return Err(CoinError::DuplicateDenom(coin.denom.clone()));
            }
        }
        Ok(Self(coins))
    }

    /// Iterates the coins in denom order.
    pub fn iter(&self) -> impl Iterator<Item = &Coin> {
        self.0.iter()
    }

    /// Number of denominations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no coins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Amount held of one denomination.
    #[must_use]
    pub fn amount_of(&self, denom: &str) -> U256 {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map_or_else(U256::zero, |c| c.amount)
    }

    /// Returns true if every coin of `other` is covered by `self`.
    #[must_use]
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other.iter().all(|c| self.amount_of(&c.denom) >= c.amount)
    }

    /// Adds two sets.
    pub fn checked_add(&self, other: &Coins) -> Result<Coins, CoinError> {
        let mut out = self.0.clone();
        for coin in other.iter() {
            match out.iter_mut().find(|c| c.denom == coin.denom) {
                Some(existing) => {
                    existing.amount = existing
                        .amount
                        .checked_add(coin.amount)
                        .ok_or_else(|| CoinError::Overflow(coin.denom.clone()))?;
                }
                None => out.push(coin.clone()),
            }
        }
        Coins::new(out)
    }

    /// Subtracts `other`; fails when any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Result<Coins, CoinError> {
        if !self.is_all_gte(other) {
            return Err(CoinError::Insufficient {
                required: other.to_string(),
                available: self.to_string(),
            });
        }
        let out = self
            .0
            .iter()
            .map(|c| Coin::new(c.denom.clone(), c.amount - other.amount_of(&c.denom)))
            .filter(|c| !c.is_zero())
            .collect();
        Ok(Coins(out))
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(","))
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = CoinError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Coins::new(coins)
    }
}

// =============================================================================
// CLUSTER C: LEDGER EVENTS
// =============================================================================

/// A key/value pair attached to an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

impl Attribute {
    /// Creates an attribute.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A ledger-visible event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type name.
    #[serde(rename = "type")]
    pub ty: String,
    /// Ordered attributes.
    pub attributes: Vec<Attribute>,
}

impl Event {
    /// Creates an event with no attributes.
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute append.
    #[must_use]
    pub fn add_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(key, value));
        self
    }

    /// Value of the first attribute with the given key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
    }
}

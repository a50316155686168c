//! Contract connection configuration.
//!
//! The connector targets one fixed contract. Its coordinates are bundled in
//! [`ContractConfig`], built once at startup (defaults, a TOML file, or
//! `RENTFUSE_*` environment overrides) and handed to the connector by value.
//! Nothing mutates it afterwards.

use crate::confirm::ConfirmationPolicy;
use crate::hash::{ScriptHash, DEFAULT_ADDRESS_VERSION};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::debug;

/// Script hash of the deployed RentFuse contract.
pub const DEFAULT_SC_SCRIPTHASH: ScriptHash = ScriptHash::from_be_bytes([
    0x8e, 0x1c, 0xa3, 0x63, 0x69, 0x5a, 0x3f, 0x76, 0x2d, 0x1b, 0xd8, 0x40, 0xe4, 0x3c, 0x8b,
    0x4a, 0x71, 0x9d, 0x0e, 0x2f,
]);

/// Network magic of the Neo N3 testnet.
pub const DEFAULT_NEO_NETWORK_MAGIC: u32 = 894_710_606;

pub const DEFAULT_NEO_RPC_ADDRESS: &str = "https://testnet1.neo.coz.io:443";

/// GAS has 8 decimals.
pub const DEFAULT_GAS_PRECISION: u64 = 100_000_000;

/// Immutable coordinates of the target contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    pub script_hash: ScriptHash,
    pub network_magic: u32,
    pub rpc_address: String,
    /// Multiplier turning a decimal price into integer GAS fractions.
    pub gas_precision: u64,
    pub address_version: u8,
    pub confirmation: ConfirmationPolicy,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            script_hash: DEFAULT_SC_SCRIPTHASH,
            network_magic: DEFAULT_NEO_NETWORK_MAGIC,
            rpc_address: DEFAULT_NEO_RPC_ADDRESS.to_string(),
            gas_precision: DEFAULT_GAS_PRECISION,
            address_version: DEFAULT_ADDRESS_VERSION,
            confirmation: ConfirmationPolicy::SingleShot,
        }
    }
}

impl ContractConfig {
    /// Parse a TOML document; omitted keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading contract configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the environment.
    ///
    /// Environment variables:
    /// - RENTFUSE_SCRIPT_HASH: contract script hash (hex or address)
    /// - RENTFUSE_NETWORK_MAGIC: network magic number
    /// - RENTFUSE_RPC_ADDRESS: RPC endpoint URL
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(hash) = lookup("RENTFUSE_SCRIPT_HASH") {
            self.script_hash = ScriptHash::parse(&hash, self.address_version)?;
        }
        if let Some(magic) = lookup("RENTFUSE_NETWORK_MAGIC") {
            self.network_magic = magic.trim().parse().map_err(|_| {
                Error::Config(format!("RENTFUSE_NETWORK_MAGIC is not a u32: {}", magic))
            })?;
        }
        if let Some(url) = lookup("RENTFUSE_RPC_ADDRESS") {
            self.rpc_address = url;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gas_precision == 0 {
            return Err(Error::Config("gas_precision must be non-zero".to_string()));
        }
        if self.rpc_address.trim().is_empty() {
            return Err(Error::Config("rpc_address must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

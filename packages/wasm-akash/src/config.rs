//! Chain configuration shared by wallets and sign-doc building

use crate::coin::{DecCoin, Denom};
use crate::error::WasmAkashError;
use serde::{Deserialize, Serialize};

/// Akash mainnet chain id
pub const DEFAULT_CHAIN_ID: &str = "akashnet-2";
/// Bech32 human-readable part of Akash account addresses
pub const DEFAULT_BECH32_PREFIX: &str = "akash";
/// Gas limit used when the caller does not provide one
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;
/// BIP-44 path for coin type 118 (cosmos)
pub const DEFAULT_HD_PATH: &str = "m/44'/118'/0'/0/0";

/// Chain parameters (e.g., loaded from a JSON config file)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Chain id (e.g., "akashnet-2", "sandbox-01")
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
    /// Price per unit of gas (e.g., "0.025uakt")
    #[serde(default = "default_gas_price")]
    pub gas_price: DecCoin,
    /// Gas limit for transactions built from this config
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,
}

pub(crate) fn default_chain_id() -> String {
    DEFAULT_CHAIN_ID.to_string()
}

/// 0.025uakt
pub(crate) fn default_gas_price() -> DecCoin {
    DecCoin::from_atomics(25_000_000_000_000_000, Denom::Uakt)
}

pub(crate) fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            gas_price: default_gas_price(),
            gas_limit: default_gas_limit(),
        }
    }
}

impl ChainConfig {
    /// Parse a config from JSON, filling missing fields with mainnet defaults
    pub fn from_json(json: &str) -> Result<Self, WasmAkashError> {
        serde_json::from_str(json)
            .map_err(|e| WasmAkashError::validation(format!("Invalid chain config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_gas_price() {
        assert_eq!(default_gas_price().to_string(), "0.025uakt");
    }

    #[test]
    fn test_from_json_defaults() {
        let config = ChainConfig::from_json("{}").unwrap();
        assert_eq!(config, ChainConfig::default());
        assert_eq!(config.chain_id, "akashnet-2");
        assert_eq!(config.gas_limit, 200_000);
    }

    #[test]
    fn test_from_json_overrides() {
        let config = ChainConfig::from_json(
            r#"{ "chainId": "sandbox-01", "gasPrice": "0.03uakt", "gasLimit": 300000 }"#,
        )
        .unwrap();
        assert_eq!(config.chain_id, "sandbox-01");
        assert_eq!(config.gas_price.to_string(), "0.03uakt");
        assert_eq!(config.gas_limit, 300_000);
    }

    #[test]
    fn test_from_json_rejects_bad_gas_price() {
        let err = ChainConfig::from_json(r#"{ "gasPrice": "0.03uatom" }"#).unwrap_err();
        assert!(matches!(err, WasmAkashError::Validation(_)));
    }
}

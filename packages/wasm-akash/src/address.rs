//! Bech32 account addresses for Akash/Cosmos chains
//!
//! address = bech32(prefix, ripemd160(sha256(compressed secp256k1 public key)))
//! See: https://docs.cosmos.network/main/learn/beginner/accounts#addresses

use crate::config::DEFAULT_BECH32_PREFIX;
use crate::error::WasmAkashError;
use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length of an account id (hash160 of the public key)
pub const ACCOUNT_ID_LENGTH: usize = 20;

/// Length of a compressed secp256k1 public key
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Hash a compressed public key to a 20-byte account id
pub fn account_id(public_key: &[u8]) -> Result<[u8; ACCOUNT_ID_LENGTH], WasmAkashError> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(WasmAkashError::validation(format!(
            "Public key must be {} bytes, got {}",
            PUBLIC_KEY_LENGTH,
            public_key.len()
        )));
    }

    let sha = Sha256::digest(public_key);
    let hash = Ripemd160::digest(sha);
    let mut id = [0u8; ACCOUNT_ID_LENGTH];
    id.copy_from_slice(&hash);
    Ok(id)
}

/// Encode a compressed public key as a bech32 address
///
/// # Arguments
/// * `public_key` - 33-byte compressed secp256k1 public key
/// * `prefix` - Human-readable part (e.g., "akash")
pub fn encode_address(public_key: &[u8], prefix: &str) -> Result<String, WasmAkashError> {
    let id = account_id(public_key)?;
    encode_account_id(&id, prefix)
}

/// Encode raw account id bytes with the given prefix
pub fn encode_account_id(id: &[u8], prefix: &str) -> Result<String, WasmAkashError> {
    let hrp = Hrp::parse(prefix)
        .map_err(|e| WasmAkashError::validation(format!("Invalid address prefix: {}", e)))?;
    bech32::encode::<Bech32>(hrp, id)
        .map_err(|e| WasmAkashError::validation(format!("Failed to encode address: {}", e)))
}

/// Decode a bech32 address to its prefix and payload bytes
///
/// Only the original bech32 checksum is accepted; bech32m strings are
/// rejected the same way the cosmos-sdk decoder rejects them.
pub fn decode_address(address: &str) -> Result<(String, Vec<u8>), WasmAkashError> {
    let checked = CheckedHrpstring::new::<Bech32>(address)
        .map_err(|e| WasmAkashError::validation(format!("Invalid bech32 address: {}", e)))?;
    Ok((checked.hrp().to_lowercase(), checked.byte_iter().collect()))
}

/// Validate an account address, optionally checking its prefix
pub fn validate_address(address: &str, expected_prefix: Option<&str>) -> bool {
    match decode_address(address) {
        Ok((prefix, data)) => {
            data.len() == ACCOUNT_ID_LENGTH && expected_prefix.map_or(true, |p| prefix == p)
        }
        Err(_) => false,
    }
}

/// Check that `value` is an Akash account address; `field` names it in the error
pub(crate) fn require_account_address(field: &str, value: &str) -> Result<(), WasmAkashError> {
    let (prefix, data) = decode_address(value)
        .map_err(|e| WasmAkashError::validation(format!("{}: {}", field, e)))?;
    if prefix != DEFAULT_BECH32_PREFIX {
        return Err(WasmAkashError::validation(format!(
            "{}: expected prefix {}, got {}",
            field, DEFAULT_BECH32_PREFIX, prefix
        )));
    }
    if data.len() != ACCOUNT_ID_LENGTH {
        return Err(WasmAkashError::validation(format!(
            "{}: invalid account length {}",
            field,
            data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBKEY: &str = "031b84c5567b126440995d3ed5aaba0565d71e1834604819ff9c17f5e9d5dd078f";
    const ADDRESS: &str = "akash10xcqpzrky6eff2g52qdye53xkk9jxkvrvmhmee";
    /// Same payload as ADDRESS with a bech32m checksum
    const ADDRESS_BECH32M: &str = "akash10xcqpzrky6eff2g52qdye53xkk9jxkvre88hum";

    #[test]
    fn test_encode_known_address() {
        let pubkey = hex::decode(PUBKEY).unwrap();
        assert_eq!(encode_address(&pubkey, "akash").unwrap(), ADDRESS);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let pubkey = hex::decode(PUBKEY).unwrap();
        let id = account_id(&pubkey).unwrap();

        let (prefix, data) = decode_address(ADDRESS).unwrap();
        assert_eq!(prefix, "akash");
        assert_eq!(data, id.to_vec());

        // Same account, different chain prefix
        let cosmos = encode_account_id(&id, "cosmos").unwrap();
        assert!(cosmos.starts_with("cosmos1"));
        assert_eq!(decode_address(&cosmos).unwrap().1, id.to_vec());
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address(ADDRESS, Some("akash")));
        assert!(validate_address(ADDRESS, None));
        assert!(!validate_address(ADDRESS, Some("cosmos"))); // Wrong prefix

        // Flipped last character breaks the checksum
        let corrupted = format!("{}f", &ADDRESS[..ADDRESS.len() - 1]);
        assert!(!validate_address(&corrupted, None));
        assert!(!validate_address("akash1abc", None));
        assert!(!validate_address("invalid", None));
    }

    #[test]
    fn test_rejects_bech32m() {
        assert!(decode_address(ADDRESS_BECH32M).is_err());
        assert!(!validate_address(ADDRESS_BECH32M, Some("akash")));
        assert!(require_account_address("owner", ADDRESS_BECH32M).is_err());
    }

    #[test]
    fn test_decode_upper_case() {
        let (prefix, data) = decode_address(&ADDRESS.to_uppercase()).unwrap();
        assert_eq!(prefix, "akash");
        assert_eq!(data, decode_address(ADDRESS).unwrap().1);
    }

    #[test]
    fn test_require_account_address() {
        assert!(require_account_address("owner", ADDRESS).is_ok());

        let err = require_account_address("owner", "akash1abc").unwrap_err();
        assert!(err.to_string().contains("owner"));

        let id = account_id(&hex::decode(PUBKEY).unwrap()).unwrap();
        let cosmos = encode_account_id(&id, "cosmos").unwrap();
        assert!(require_account_address("owner", &cosmos).is_err());
    }

    #[test]
    fn test_invalid_pubkey_length() {
        assert!(encode_address(&[0u8; 32], "akash").is_err());
        assert!(encode_address(&[0u8; 65], "akash").is_err());
    }
}

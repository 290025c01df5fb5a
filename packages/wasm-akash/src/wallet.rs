//! secp256k1 wallet: owns the private key, derives public key and address
//!
//! The private key lives in a `k256::ecdsa::SigningKey`, which zeroizes its
//! scalar on drop. `dispose` drops it eagerly; after that every signing
//! attempt fails with `WasmAkashError::Signing`.

use crate::address::{encode_address, PUBLIC_KEY_LENGTH};
use crate::config::{DEFAULT_BECH32_PREFIX, DEFAULT_HD_PATH};
use crate::error::WasmAkashError;
use crate::proto::{cosmos, Any};
use bip32::{DerivationPath, XPrv};
use bip39::{Language, Mnemonic};
use k256::ecdsa::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroizing;

/// Compressed secp256k1 public key (33 bytes)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Parse a SEC1 compressed public key; rejects points not on the curve
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, WasmAkashError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(WasmAkashError::validation(format!(
                "Public key must be {} bytes, got {}",
                PUBLIC_KEY_LENGTH,
                bytes.len()
            )));
        }
        // Only the 0x02/0x03 compressed tags hash to the account address
        if !matches!(bytes[0], 0x02 | 0x03) {
            return Err(WasmAkashError::validation(format!(
                "Public key must be compressed, got tag 0x{:02x}",
                bytes[0]
            )));
        }
        VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| WasmAkashError::validation(format!("Invalid public key: {}", e)))?;

        let mut key = [0u8; PUBLIC_KEY_LENGTH];
        key.copy_from_slice(bytes);
        Ok(PublicKey(key))
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, WasmAkashError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)
            .map_err(|e| WasmAkashError::validation(format!("Invalid hex: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(true);
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(point.as_bytes());
        PublicKey(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bech32 account address for this key under `prefix`
    pub fn address(&self, prefix: &str) -> Result<String, WasmAkashError> {
        encode_address(&self.0, prefix)
    }

    pub(crate) fn verifying_key(&self) -> Option<VerifyingKey> {
        VerifyingKey::from_sec1_bytes(&self.0).ok()
    }

    /// `/cosmos.crypto.secp256k1.PubKey` wrapped in `Any`
    pub fn to_any(&self) -> Any {
        Any::pack(
            cosmos::SECP256K1_PUBKEY_TYPE_URL,
            &cosmos::PubKey {
                key: self.0.to_vec(),
            },
        )
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for PublicKey {
    type Err = WasmAkashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for PublicKey {
    type Error = WasmAkashError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        key.to_hex()
    }
}

/// Holder of a single secp256k1 private key
///
/// Signing borrows the wallet immutably, so a wallet can be shared across
/// threads for concurrent signing. Disposal needs `&mut self`.
pub struct Wallet {
    signing_key: Option<SigningKey>,
    public_key: PublicKey,
    address: String,
}

impl Wallet {
    /// Generate a wallet from fresh OS randomness
    pub fn generate() -> Result<Wallet, WasmAkashError> {
        let mut bytes = Zeroizing::new([0u8; 32]);
        // A random 32-byte string is out of range with probability ~2^-128
        loop {
            getrandom::getrandom(bytes.as_mut_slice())
                .map_err(|e| WasmAkashError::signing(format!("Random source failed: {}", e)))?;
            if let Ok(signing_key) = SigningKey::from_slice(bytes.as_slice()) {
                return Self::from_signing_key(signing_key);
            }
        }
    }

    /// Create a wallet from a 32-byte private key
    pub fn from_private_key(private_key: &[u8]) -> Result<Wallet, WasmAkashError> {
        if private_key.len() != 32 {
            return Err(WasmAkashError::signing("Private key must be 32 bytes"));
        }

        let signing_key = SigningKey::from_slice(private_key)
            .map_err(|e| WasmAkashError::signing(format!("Invalid private key: {}", e)))?;

        Self::from_signing_key(signing_key)
    }

    /// Create a wallet from a hex-encoded private key (optional `0x` prefix)
    pub fn from_private_key_hex(private_key_hex: &str) -> Result<Wallet, WasmAkashError> {
        let hex_str = private_key_hex
            .strip_prefix("0x")
            .unwrap_or(private_key_hex);
        let bytes = Zeroizing::new(
            hex::decode(hex_str)
                .map_err(|e| WasmAkashError::signing(format!("Invalid private key hex: {}", e)))?,
        );
        Self::from_private_key(&bytes)
    }

    /// Derive a wallet from a BIP-39 mnemonic
    ///
    /// # Arguments
    /// * `phrase` - English mnemonic phrase
    /// * `path` - BIP-32 derivation path (default: `m/44'/118'/0'/0/0`)
    pub fn from_mnemonic(phrase: &str, path: Option<&str>) -> Result<Wallet, WasmAkashError> {
        let normalized = Zeroizing::new(phrase.split_whitespace().collect::<Vec<_>>().join(" "));
        let mnemonic = Mnemonic::parse_in(Language::English, normalized.as_str())
            .map_err(|e| WasmAkashError::signing(format!("Invalid mnemonic: {}", e)))?;

        let path = DerivationPath::from_str(path.unwrap_or(DEFAULT_HD_PATH))
            .map_err(|e| WasmAkashError::signing(format!("Invalid derivation path: {}", e)))?;

        let seed = Zeroizing::new(mnemonic.to_seed(""));
        let xprv = XPrv::derive_from_path(seed.as_slice(), &path)
            .map_err(|e| WasmAkashError::signing(format!("Key derivation failed: {}", e)))?;

        Self::from_signing_key(xprv.private_key().clone())
    }

    fn from_signing_key(signing_key: SigningKey) -> Result<Wallet, WasmAkashError> {
        let public_key = PublicKey::from_verifying_key(signing_key.verifying_key());
        let address = public_key.address(DEFAULT_BECH32_PREFIX)?;

        Ok(Wallet {
            signing_key: Some(signing_key),
            public_key,
            address,
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Account address with the `akash` prefix
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Account address under another chain prefix
    pub fn address_with_prefix(&self, prefix: &str) -> Result<String, WasmAkashError> {
        self.public_key.address(prefix)
    }

    pub fn is_disposed(&self) -> bool {
        self.signing_key.is_none()
    }

    /// Wipe the private key. Public key and address stay readable.
    pub fn dispose(&mut self) {
        // SigningKey zeroizes its scalar on drop
        self.signing_key = None;
    }

    pub(crate) fn signing_key(&self) -> Result<&SigningKey, WasmAkashError> {
        self.signing_key
            .as_ref()
            .ok_or_else(|| WasmAkashError::signing("Wallet key material has been disposed"))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

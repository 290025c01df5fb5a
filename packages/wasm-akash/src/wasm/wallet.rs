//! WASM bindings for Wallet
//!
//! Wraps `crate::wallet::Wallet` for JavaScript. Call `dispose()` when done;
//! the private key is wiped and any later signing attempt throws.

use crate::error::WasmAkashError;
use crate::wallet::Wallet;
use wasm_bindgen::prelude::*;

/// WASM wrapper for an Akash secp256k1 wallet
#[wasm_bindgen]
#[derive(Debug)]
pub struct WasmWallet {
    inner: Wallet,
}

#[wasm_bindgen]
impl WasmWallet {
    /// Generate a new random wallet
    #[wasm_bindgen]
    pub fn generate() -> Result<WasmWallet, WasmAkashError> {
        Wallet::generate().map(|inner| WasmWallet { inner })
    }

    /// Create a wallet from a 32-byte private key
    #[wasm_bindgen(js_name = fromPrivateKey)]
    pub fn from_private_key(private_key: &[u8]) -> Result<WasmWallet, WasmAkashError> {
        Wallet::from_private_key(private_key).map(|inner| WasmWallet { inner })
    }

    /// Create a wallet from a hex private key (optional 0x prefix)
    #[wasm_bindgen(js_name = fromPrivateKeyHex)]
    pub fn from_private_key_hex(private_key: &str) -> Result<WasmWallet, WasmAkashError> {
        Wallet::from_private_key_hex(private_key).map(|inner| WasmWallet { inner })
    }

    /// Derive a wallet from a BIP-39 mnemonic
    ///
    /// @param phrase - English mnemonic phrase
    /// @param path - Derivation path (default "m/44'/118'/0'/0/0")
    #[wasm_bindgen(js_name = fromMnemonic)]
    pub fn from_mnemonic(phrase: &str, path: Option<String>) -> Result<WasmWallet, WasmAkashError> {
        Wallet::from_mnemonic(phrase, path.as_deref()).map(|inner| WasmWallet { inner })
    }

    /// Compressed public key as a 33-byte Uint8Array
    #[wasm_bindgen(getter, js_name = publicKey)]
    pub fn public_key(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.inner.public_key().as_bytes()[..])
    }

    #[wasm_bindgen(getter, js_name = publicKeyHex)]
    pub fn public_key_hex(&self) -> String {
        self.inner.public_key().to_hex()
    }

    /// Bech32 address (akash1...)
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> String {
        self.inner.address().to_string()
    }

    /// Address of the same key under another chain prefix
    #[wasm_bindgen(js_name = addressWithPrefix)]
    pub fn address_with_prefix(&self, prefix: &str) -> Result<String, WasmAkashError> {
        self.inner.address_with_prefix(prefix)
    }

    #[wasm_bindgen(getter, js_name = isDisposed)]
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// Wipe the private key; public key and address stay readable
    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.inner.dispose();
    }
}

impl WasmWallet {
    /// Get the inner Wallet for internal Rust use.
    pub fn inner(&self) -> &Wallet {
        &self.inner
    }
}

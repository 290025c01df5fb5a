//! WASM bindings for message building and signing
//!
//! BuilderNamespace provides the entry points for the Akash signing flow:
//! buildMessage(intent) -> buildSignDoc(message, context) -> sign(doc, wallet)

use crate::error::WasmAkashError;
use crate::message::{build_message, MessageIntent};
use crate::sign_doc::{build_sign_doc, BuildContext};
use crate::signer::{sign, verify};
use crate::wallet::PublicKey;
use crate::wasm::transaction::{WasmMessage, WasmSignDoc, WasmSignedTransaction};
use crate::wasm::wallet::WasmWallet;
use wasm_bindgen::prelude::*;

/// Namespace for building and signing operations
#[wasm_bindgen]
pub struct BuilderNamespace;

#[wasm_bindgen]
impl BuilderNamespace {
    /// Validate an intent and build a message
    ///
    /// # Example Intent (createDeployment)
    /// ```json
    /// {
    ///   "type": "createDeployment",
    ///   "owner": "akash1...",
    ///   "dseq": "1234",
    ///   "deposit": "5000000uakt",
    ///   "groups": [{
    ///     "name": "westcoast",
    ///     "resources": [{
    ///       "cpuMillis": 1000,
    ///       "memoryBytes": 536870912,
    ///       "storage": [{ "name": "default", "sizeBytes": 1073741824 }],
    ///       "count": 1,
    ///       "price": "1000uakt"
    ///     }]
    ///   }]
    /// }
    /// ```
    ///
    /// # Intent Types
    /// - `createDeployment`: owner, dseq, groups, deposit, depositor?, version?
    /// - `createBid`: order { owner, dseq, gseq, oseq }, provider, price, deposit?
    /// - `createLease`: bidId { owner, dseq, gseq, oseq, provider }
    #[wasm_bindgen(js_name = buildMessage)]
    pub fn build_message_wasm(intent: JsValue) -> Result<WasmMessage, JsValue> {
        let intent: MessageIntent = serde_wasm_bindgen::from_value(intent)
            .map_err(|e| WasmAkashError::validation(format!("Invalid intent: {}", e)))?;

        let message = build_message(intent)?;
        Ok(WasmMessage::from_inner(message))
    }

    /// Build the canonical sign doc for a message
    ///
    /// # Example Context
    /// ```json
    /// {
    ///   "chainId": "akashnet-2",
    ///   "accountNumber": 42,
    ///   "sequence": 7,
    ///   "gasLimit": 200000,
    ///   "fee": "5000uakt",
    ///   "memo": "",
    ///   "publicKey": "03..."
    /// }
    /// ```
    #[wasm_bindgen(js_name = buildSignDoc)]
    pub fn build_sign_doc_wasm(
        message: &WasmMessage,
        context: JsValue,
    ) -> Result<WasmSignDoc, JsValue> {
        let context: BuildContext = serde_wasm_bindgen::from_value(context)
            .map_err(|e| WasmAkashError::encoding(format!("Invalid context: {}", e)))?;

        let doc = build_sign_doc(message.inner(), &context)?;
        Ok(WasmSignDoc::from_inner(doc))
    }

    /// Sign a sign doc with a wallet
    #[wasm_bindgen(js_name = sign)]
    pub fn sign_wasm(
        sign_doc: &WasmSignDoc,
        wallet: &WasmWallet,
    ) -> Result<WasmSignedTransaction, JsValue> {
        let tx = sign(sign_doc.inner(), wallet.inner())?;
        Ok(WasmSignedTransaction::from_inner(tx))
    }

    /// Verify a signed transaction against an expected 33-byte public key
    ///
    /// Returns false for malformed keys; never throws.
    #[wasm_bindgen(js_name = verify)]
    pub fn verify_wasm(transaction: &WasmSignedTransaction, public_key: &[u8]) -> bool {
        match PublicKey::from_bytes(public_key) {
            Ok(key) => verify(transaction.inner(), &key),
            Err(_) => false,
        }
    }
}

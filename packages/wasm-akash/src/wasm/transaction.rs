//! WASM bindings for messages, sign docs and signed transactions
//!
//! Thin wrappers around the core types with #[wasm_bindgen]

use crate::broadcast::{rest_broadcast_body, rpc_broadcast_request, BroadcastMode};
use crate::error::WasmAkashError;
use crate::message::UnsignedMessage;
use crate::sign_doc::SignDoc;
use crate::transaction::SignedTransaction;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// WASM-exposed validated message
#[wasm_bindgen]
pub struct WasmMessage {
    inner: UnsignedMessage,
}

#[wasm_bindgen]
impl WasmMessage {
    /// Message kind ("createDeployment", "createBid", "createLease")
    #[wasm_bindgen(getter)]
    pub fn kind(&self) -> String {
        self.inner.kind().as_str().to_string()
    }

    /// Protobuf type URL
    #[wasm_bindgen(getter, js_name = typeUrl)]
    pub fn type_url(&self) -> String {
        self.inner.type_url().to_string()
    }

    /// Address expected to sign this message
    #[wasm_bindgen(getter)]
    pub fn signer(&self) -> String {
        self.inner.signer().to_string()
    }

    /// Encoded message (the `value` of its `Any`)
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_any().value
    }
}

impl WasmMessage {
    pub(crate) fn from_inner(inner: UnsignedMessage) -> Self {
        WasmMessage { inner }
    }

    pub(crate) fn inner(&self) -> &UnsignedMessage {
        &self.inner
    }
}

/// WASM-exposed sign doc
#[wasm_bindgen]
pub struct WasmSignDoc {
    inner: SignDoc,
}

#[wasm_bindgen]
impl WasmSignDoc {
    /// The bytes to sign
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }

    #[wasm_bindgen(js_name = toHex)]
    pub fn to_hex(&self) -> String {
        self.inner.to_hex()
    }

    #[wasm_bindgen(getter, js_name = bodyBytes)]
    pub fn body_bytes(&self) -> Vec<u8> {
        self.inner.body_bytes().to_vec()
    }

    #[wasm_bindgen(getter, js_name = authInfoBytes)]
    pub fn auth_info_bytes(&self) -> Vec<u8> {
        self.inner.auth_info_bytes().to_vec()
    }

    #[wasm_bindgen(getter, js_name = chainId)]
    pub fn chain_id(&self) -> String {
        self.inner.chain_id().to_string()
    }

    /// Account number as BigInt
    #[wasm_bindgen(getter, js_name = accountNumber)]
    pub fn account_number(&self) -> u64 {
        self.inner.account_number()
    }

    /// Sequence as BigInt
    #[wasm_bindgen(getter)]
    pub fn sequence(&self) -> u64 {
        self.inner.sequence()
    }
}

impl WasmSignDoc {
    pub(crate) fn from_inner(inner: SignDoc) -> Self {
        WasmSignDoc { inner }
    }

    pub(crate) fn inner(&self) -> &SignDoc {
        &self.inner
    }
}

/// WASM-exposed signed transaction
#[wasm_bindgen]
pub struct WasmSignedTransaction {
    inner: SignedTransaction,
}

#[wasm_bindgen]
impl WasmSignedTransaction {
    /// Decode a TxRaw
    ///
    /// # Arguments
    /// * `bytes` - Encoded TxRaw
    /// * `chain_id` - Chain the transaction was signed for
    /// * `account_number` - Signer's account number
    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(
        bytes: &[u8],
        chain_id: &str,
        account_number: u64,
    ) -> Result<WasmSignedTransaction, WasmAkashError> {
        SignedTransaction::from_tx_raw(bytes, chain_id, account_number).map(Self::from_inner)
    }

    /// Serialize to TxRaw bytes
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_bytes()
    }

    #[wasm_bindgen(js_name = toBase64)]
    pub fn to_base64(&self) -> String {
        self.inner.to_base64()
    }

    /// Upper-case hex SHA-256 of the TxRaw bytes
    #[wasm_bindgen(getter, js_name = txHash)]
    pub fn tx_hash(&self) -> String {
        self.inner.tx_hash()
    }

    /// 64-byte compact signature
    #[wasm_bindgen(getter)]
    pub fn signature(&self) -> Vec<u8> {
        self.inner.signature().to_vec()
    }

    /// 33-byte compressed public key
    #[wasm_bindgen(getter, js_name = publicKey)]
    pub fn public_key(&self) -> Vec<u8> {
        self.inner.public_key().as_bytes().to_vec()
    }

    #[wasm_bindgen(getter, js_name = signDoc)]
    pub fn sign_doc(&self) -> WasmSignDoc {
        WasmSignDoc::from_inner(self.inner.sign_doc().clone())
    }

    /// Tendermint JSON-RPC broadcast request
    ///
    /// @param mode - "sync" (default), "async" or "commit"
    /// @param id - JSON-RPC request id
    #[wasm_bindgen(js_name = rpcBroadcastRequest)]
    pub fn rpc_broadcast_request(&self, mode: JsValue, id: u32) -> Result<JsValue, JsValue> {
        let mode = parse_mode(mode)?;
        to_js(&rpc_broadcast_request(&self.inner.to_bytes(), mode, id as u64))
    }

    /// cosmos-sdk REST broadcast body (`POST /cosmos/tx/v1beta1/txs`)
    #[wasm_bindgen(js_name = restBroadcastBody)]
    pub fn rest_broadcast_body(&self, mode: JsValue) -> Result<JsValue, JsValue> {
        let mode = parse_mode(mode)?;
        to_js(&rest_broadcast_body(&self.inner.to_bytes(), mode))
    }
}

impl WasmSignedTransaction {
    pub(crate) fn from_inner(inner: SignedTransaction) -> Self {
        WasmSignedTransaction { inner }
    }

    pub(crate) fn inner(&self) -> &SignedTransaction {
        &self.inner
    }
}

fn parse_mode(mode: JsValue) -> Result<BroadcastMode, JsValue> {
    let mode: Option<BroadcastMode> = serde_wasm_bindgen::from_value(mode)
        .map_err(|e| WasmAkashError::validation(format!("Invalid broadcast mode: {}", e)))?;
    Ok(mode.unwrap_or_default())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects rather than Maps
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| WasmAkashError::encoding(e.to_string()).into())
}

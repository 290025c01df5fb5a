//! SIGN_MODE_DIRECT sign documents
//!
//! The sign doc is `cosmos.tx.v1beta1.SignDoc`: the encoded `TxBody`, the
//! encoded `AuthInfo`, the chain id and the account number. prost writes
//! fields in tag order and skips proto3 defaults, so the same logical input
//! always yields the same bytes.

use crate::coin::{Coin, DecCoin};
use crate::config::{default_chain_id, default_gas_limit, default_gas_price, ChainConfig};
use crate::error::WasmAkashError;
use crate::message::types::deserialize_u64;
use crate::message::UnsignedMessage;
use crate::proto::cosmos::{self, AuthInfo, Fee, ModeInfo, SignerInfo, TxBody};
use crate::wallet::PublicKey;
use prost::Message;
use serde::{Deserialize, Serialize};

/// Longest chain id tendermint accepts
pub const MAX_CHAIN_ID_LENGTH: usize = 48;

/// cosmos-sdk `auth` module default for `max_memo_characters`
pub const MAX_MEMO_CHARACTERS: usize = 256;

/// Chain metadata needed to turn a message into a sign doc
///
/// # Example (JSON)
/// ```json
/// {
///   "chainId": "akashnet-2",
///   "accountNumber": "42",
///   "sequence": 7,
///   "gasLimit": 200000,
///   "fee": "5000uakt",
///   "memo": "",
///   "publicKey": "03..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildContext {
    #[serde(default = "default_chain_id")]
    pub chain_id: String,
    /// On-chain account number of the signer
    #[serde(deserialize_with = "deserialize_u64")]
    pub account_number: u64,
    /// Signer's next sequence (nonce)
    #[serde(deserialize_with = "deserialize_u64")]
    pub sequence: u64,
    #[serde(default = "default_gas_limit", deserialize_with = "deserialize_u64")]
    pub gas_limit: u64,
    /// Explicit fee; when absent the fee is `gas_price * gas_limit`, rounded up
    #[serde(default)]
    pub fee: Option<Coin>,
    #[serde(default = "default_gas_price")]
    pub gas_price: DecCoin,
    #[serde(default)]
    pub memo: String,
    #[serde(default, deserialize_with = "deserialize_u64")]
    pub timeout_height: u64,
    /// Signer public key embedded in `SignerInfo`; the chain needs it for an
    /// account's first transaction
    pub public_key: PublicKey,
}

impl BuildContext {
    /// Mainnet defaults for everything except the signer
    pub fn new(account_number: u64, sequence: u64, public_key: PublicKey) -> Self {
        Self::from_config(&ChainConfig::default(), account_number, sequence, public_key)
    }

    pub fn from_config(
        config: &ChainConfig,
        account_number: u64,
        sequence: u64,
        public_key: PublicKey,
    ) -> Self {
        BuildContext {
            chain_id: config.chain_id.clone(),
            account_number,
            sequence,
            gas_limit: config.gas_limit,
            fee: None,
            gas_price: config.gas_price.clone(),
            memo: String::new(),
            timeout_height: 0,
            public_key,
        }
    }

    /// Parse a context from JSON
    ///
    /// Values outside their domain (negative or fractional numbers, missing
    /// or bad public keys) are encoding errors.
    pub fn from_json(json: &str) -> Result<Self, WasmAkashError> {
        serde_json::from_str(json)
            .map_err(|e| WasmAkashError::encoding(format!("Invalid build context: {}", e)))
    }

    pub fn with_fee(mut self, fee: Coin) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn with_timeout_height(mut self, timeout_height: u64) -> Self {
        self.timeout_height = timeout_height;
        self
    }

    fn validate(&self) -> Result<(), WasmAkashError> {
        if self.chain_id.trim().is_empty() {
            return Err(WasmAkashError::encoding("Chain id cannot be empty"));
        }
        if self.chain_id.len() > MAX_CHAIN_ID_LENGTH {
            return Err(WasmAkashError::encoding(format!(
                "Chain id exceeds {} characters",
                MAX_CHAIN_ID_LENGTH
            )));
        }
        if self.gas_limit == 0 {
            return Err(WasmAkashError::encoding("Gas limit must be positive"));
        }
        if self.memo.chars().count() > MAX_MEMO_CHARACTERS {
            return Err(WasmAkashError::encoding(format!(
                "Memo exceeds {} characters",
                MAX_MEMO_CHARACTERS
            )));
        }
        Ok(())
    }

    fn fee(&self) -> Result<Coin, WasmAkashError> {
        match &self.fee {
            Some(fee) => Ok(fee.clone()),
            None => self.gas_price.mul_ceil(self.gas_limit),
        }
    }
}

/// Canonical bytes to sign, plus the parts they were built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignDoc {
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
    chain_id: String,
    account_number: u64,
    sequence: u64,
    public_key: Option<PublicKey>,
    bytes: Vec<u8>,
}

impl SignDoc {
    /// Rebuild a sign doc from encoded body and auth info (e.g., out of a `TxRaw`)
    pub fn from_parts(
        body_bytes: Vec<u8>,
        auth_info_bytes: Vec<u8>,
        chain_id: &str,
        account_number: u64,
    ) -> Result<SignDoc, WasmAkashError> {
        let auth_info = AuthInfo::decode(auth_info_bytes.as_slice())
            .map_err(|e| WasmAkashError::encoding(format!("Invalid auth info: {}", e)))?;
        let signer = match auth_info.signer_infos.as_slice() {
            [signer] => signer,
            other => {
                return Err(WasmAkashError::encoding(format!(
                    "Expected exactly one signer, found {}",
                    other.len()
                )))
            }
        };

        let public_key = match &signer.public_key {
            None => None,
            Some(any) if any.type_url == cosmos::SECP256K1_PUBKEY_TYPE_URL => {
                let key = cosmos::PubKey::decode(any.value.as_slice())
                    .map_err(|e| WasmAkashError::encoding(format!("Invalid public key: {}", e)))?;
                let key = PublicKey::from_bytes(&key.key)
                    .map_err(|e| WasmAkashError::encoding(e.to_string()))?;
                Some(key)
            }
            Some(any) => {
                return Err(WasmAkashError::encoding(format!(
                    "Unsupported public key type: {}",
                    any.type_url
                )))
            }
        };

        Ok(Self::assemble(
            body_bytes,
            auth_info_bytes,
            chain_id.to_string(),
            account_number,
            signer.sequence,
            public_key,
        ))
    }

    fn assemble(
        body_bytes: Vec<u8>,
        auth_info_bytes: Vec<u8>,
        chain_id: String,
        account_number: u64,
        sequence: u64,
        public_key: Option<PublicKey>,
    ) -> SignDoc {
        let bytes = encode_sign_doc(&body_bytes, &auth_info_bytes, &chain_id, account_number);
        SignDoc {
            body_bytes,
            auth_info_bytes,
            chain_id,
            account_number,
            sequence,
            public_key,
            bytes,
        }
    }

    /// Encoded `cosmos.tx.v1beta1.SignDoc`; these are the bytes that get signed
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body_bytes
    }

    pub fn auth_info_bytes(&self) -> &[u8] {
        &self.auth_info_bytes
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Signer public key embedded in the auth info, if any
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.public_key.as_ref()
    }

    /// Re-encode the sign doc from its parts
    pub(crate) fn canonical_bytes(&self) -> Vec<u8> {
        encode_sign_doc(
            &self.body_bytes,
            &self.auth_info_bytes,
            &self.chain_id,
            self.account_number,
        )
    }
}

fn encode_sign_doc(
    body_bytes: &[u8],
    auth_info_bytes: &[u8],
    chain_id: &str,
    account_number: u64,
) -> Vec<u8> {
    cosmos::SignDoc {
        body_bytes: body_bytes.to_vec(),
        auth_info_bytes: auth_info_bytes.to_vec(),
        chain_id: chain_id.to_string(),
        account_number,
    }
    .encode_to_vec()
}

/// Build the sign doc for a single-message transaction
///
/// # Errors
/// `WasmAkashError::Encoding` when a context value is outside its domain
/// (empty or over-long chain id, zero gas limit, over-long memo, fee
/// overflow).
pub fn build_sign_doc(
    message: &UnsignedMessage,
    context: &BuildContext,
) -> Result<SignDoc, WasmAkashError> {
    context.validate()?;
    let fee = context.fee()?;

    let body = TxBody {
        messages: vec![message.to_any()],
        memo: context.memo.clone(),
        timeout_height: context.timeout_height,
    };

    let auth_info = AuthInfo {
        signer_infos: vec![SignerInfo {
            public_key: Some(context.public_key.to_any()),
            mode_info: Some(ModeInfo::direct()),
            sequence: context.sequence,
        }],
        fee: Some(Fee {
            amount: vec![fee.to_proto()],
            gas_limit: context.gas_limit,
            payer: String::new(),
            granter: String::new(),
        }),
    };

    let doc = SignDoc::assemble(
        body.encode_to_vec(),
        auth_info.encode_to_vec(),
        context.chain_id.clone(),
        context.account_number,
        context.sequence,
        Some(context.public_key),
    );

    tracing::debug!(
        kind = message.kind().as_str(),
        chain_id = %doc.chain_id,
        account_number = doc.account_number,
        sequence = doc.sequence,
        fee = %fee,
        size = doc.bytes.len(),
        "built sign doc"
    );
    Ok(doc)
}

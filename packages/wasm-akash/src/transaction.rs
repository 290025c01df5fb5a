//! Signed transactions and their `TxRaw` serialization

use crate::error::WasmAkashError;
use crate::proto::cosmos::TxRaw;
use crate::sign_doc::SignDoc;
use crate::wallet::PublicKey;
use base64::{engine::general_purpose::STANDARD, Engine};
use prost::Message;
use sha2::{Digest, Sha256};

/// Length of a compact (`r || s`) secp256k1 signature
pub const SIGNATURE_LENGTH: usize = 64;

/// A sign doc together with its signature and the signer's public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    sign_doc: SignDoc,
    signature: [u8; SIGNATURE_LENGTH],
    public_key: PublicKey,
}

impl SignedTransaction {
    pub(crate) fn new(
        sign_doc: SignDoc,
        signature: [u8; SIGNATURE_LENGTH],
        public_key: PublicKey,
    ) -> Self {
        SignedTransaction {
            sign_doc,
            signature,
            public_key,
        }
    }

    /// Decode a broadcast-ready `TxRaw`
    ///
    /// Chain id and account number are not part of `TxRaw`; they have to come
    /// from the caller to rebuild the sign doc. The public key is taken from
    /// the auth info, so a transaction without one cannot be decoded.
    ///
    /// # Arguments
    /// * `bytes` - Encoded `cosmos.tx.v1beta1.TxRaw`
    /// * `chain_id` - Chain the transaction was signed for
    /// * `account_number` - Signer's account number
    pub fn from_tx_raw(
        bytes: &[u8],
        chain_id: &str,
        account_number: u64,
    ) -> Result<Self, WasmAkashError> {
        let raw = TxRaw::decode(bytes)
            .map_err(|e| WasmAkashError::encoding(format!("Invalid TxRaw: {}", e)))?;

        let signature = match raw.signatures.as_slice() {
            [signature] => <[u8; SIGNATURE_LENGTH]>::try_from(signature.as_slice())
                .map_err(|_| {
                    WasmAkashError::encoding(format!(
                        "Signature must be {} bytes, got {}",
                        SIGNATURE_LENGTH,
                        signature.len()
                    ))
                })?,
            other => {
                return Err(WasmAkashError::encoding(format!(
                    "Expected exactly one signature, found {}",
                    other.len()
                )))
            }
        };

        let sign_doc =
            SignDoc::from_parts(raw.body_bytes, raw.auth_info_bytes, chain_id, account_number)?;
        let public_key = *sign_doc
            .public_key()
            .ok_or_else(|| WasmAkashError::encoding("Transaction carries no public key"))?;

        Ok(SignedTransaction {
            sign_doc,
            signature,
            public_key,
        })
    }

    pub fn sign_doc(&self) -> &SignDoc {
        &self.sign_doc
    }

    pub fn signature(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.signature
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn to_tx_raw(&self) -> TxRaw {
        TxRaw {
            body_bytes: self.sign_doc.body_bytes().to_vec(),
            auth_info_bytes: self.sign_doc.auth_info_bytes().to_vec(),
            signatures: vec![self.signature.to_vec()],
        }
    }

    /// Encoded `TxRaw`, ready to broadcast
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_tx_raw().encode_to_vec()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Transaction hash as reported by the chain (upper-case hex SHA-256 of the TxRaw)
    pub fn tx_hash(&self) -> String {
        hex::encode_upper(Sha256::digest(self.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::deployment::tests::sample_group;
    use crate::message::{build_message, MessageIntent};
    use crate::proto::cosmos::AuthInfo;
    use crate::sign_doc::{build_sign_doc, BuildContext};
    use crate::signer::sign;
    use crate::wallet::Wallet;

    fn signed() -> SignedTransaction {
        let wallet = Wallet::from_private_key(&[1u8; 32]).unwrap();
        let message = build_message(MessageIntent::CreateDeployment {
            owner: Some(wallet.address().to_string()),
            dseq: Some(1),
            groups: vec![sample_group()],
            deposit: Some("5000000uakt".to_string()),
            depositor: None,
            version: None,
        })
        .unwrap();
        let context = BuildContext::new(42, 7, *wallet.public_key());
        sign(&build_sign_doc(&message, &context).unwrap(), &wallet).unwrap()
    }

    #[test]
    fn test_tx_raw_layout() {
        let tx = signed();
        let raw = TxRaw::decode(tx.to_bytes().as_slice()).unwrap();
        assert_eq!(raw.body_bytes, tx.sign_doc().body_bytes());
        assert_eq!(raw.auth_info_bytes, tx.sign_doc().auth_info_bytes());
        assert_eq!(raw.signatures, vec![tx.signature().to_vec()]);

        assert_eq!(STANDARD.decode(tx.to_base64()).unwrap(), tx.to_bytes());
    }

    #[test]
    fn test_tx_hash_format() {
        let tx = signed();
        let hash = tx.tx_hash();
        assert_eq!(hash.len(), 64);
        assert!(hash
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_eq!(hash, tx.clone().tx_hash());
    }

    #[test]
    fn test_from_tx_raw() {
        let tx = signed();
        let decoded = SignedTransaction::from_tx_raw(&tx.to_bytes(), "akashnet-2", 42).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded.sign_doc().public_key(), Some(tx.public_key()));
    }

    #[test]
    fn test_from_tx_raw_errors() {
        // No public key in the auth info
        let mut raw = signed().to_tx_raw();
        let mut auth_info = AuthInfo::decode(raw.auth_info_bytes.as_slice()).unwrap();
        auth_info.signer_infos[0].public_key = None;
        raw.auth_info_bytes = auth_info.encode_to_vec();
        let err = SignedTransaction::from_tx_raw(&raw.encode_to_vec(), "akashnet-2", 42).unwrap_err();
        assert!(matches!(err, WasmAkashError::Encoding(_)));

        let mut raw = signed().to_tx_raw();
        raw.signatures[0].truncate(63);
        assert!(SignedTransaction::from_tx_raw(&raw.encode_to_vec(), "akashnet-2", 42).is_err());

        raw.signatures.clear();
        assert!(SignedTransaction::from_tx_raw(&raw.encode_to_vec(), "akashnet-2", 42).is_err());

        assert!(SignedTransaction::from_tx_raw(&[0xff, 0xff], "akashnet-2", 42).is_err());
    }
}

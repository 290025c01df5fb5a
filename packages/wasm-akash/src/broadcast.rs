//! Chain collaborators and the build → sign → broadcast pipeline
//!
//! Network access stays outside this crate. A `ChainClient` implementation
//! (REST, RPC, a test double) supplies the account state and carries signed
//! bytes to a node; retries and backoff belong to that implementation.

use crate::address::decode_address;
use crate::config::ChainConfig;
use crate::error::WasmAkashError;
use crate::message::types::deserialize_u64;
use crate::message::UnsignedMessage;
use crate::sign_doc::{build_sign_doc, BuildContext};
use crate::signer::sign;
use crate::transaction::SignedTransaction;
use crate::wallet::Wallet;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// On-chain account state needed to sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(deserialize_with = "deserialize_u64")]
    pub account_number: u64,
    #[serde(deserialize_with = "deserialize_u64")]
    pub sequence: u64,
}

/// Chain query service and broadcaster
pub trait ChainClient {
    type Error;

    /// Account number and next sequence for `address`
    fn account(&self, address: &str) -> Result<AccountInfo, Self::Error>;

    /// Submit encoded `TxRaw` bytes; returns the transaction hash
    fn broadcast(&self, tx_bytes: &[u8]) -> Result<String, Self::Error>;
}

/// Failure of `submit`: either our own build/sign step or the client
#[derive(Debug, thiserror::Error)]
pub enum SubmitError<E> {
    #[error(transparent)]
    Build(#[from] WasmAkashError),
    #[error("Chain client error: {0}")]
    Client(E),
}

/// Outcome of a successful `submit`
#[derive(Debug, Clone)]
pub struct Submitted {
    pub transaction: SignedTransaction,
    /// Hash returned by the broadcaster
    pub tx_hash: String,
}

/// Query the signer's account, build and sign the transaction, broadcast it
///
/// The wallet's public key is always embedded in the auth info, so this also
/// works for an account's first transaction.
pub fn submit<C: ChainClient>(
    client: &C,
    wallet: &Wallet,
    message: &UnsignedMessage,
    config: &ChainConfig,
) -> Result<Submitted, SubmitError<C::Error>> {
    if !same_account(message.signer(), wallet.address()) {
        return Err(WasmAkashError::signing(format!(
            "Message must be signed by {}, wallet is {}",
            message.signer(),
            wallet.address()
        ))
        .into());
    }

    let account = client
        .account(wallet.address())
        .map_err(SubmitError::Client)?;
    let context = BuildContext::from_config(
        config,
        account.account_number,
        account.sequence,
        *wallet.public_key(),
    );

    let sign_doc = build_sign_doc(message, &context)?;
    let transaction = sign(&sign_doc, wallet)?;
    let tx_hash = client
        .broadcast(&transaction.to_bytes())
        .map_err(SubmitError::Client)?;

    tracing::debug!(
        kind = message.kind().as_str(),
        tx_hash = %tx_hash,
        sequence = account.sequence,
        "broadcast transaction"
    );
    Ok(Submitted {
        transaction,
        tx_hash,
    })
}

/// Compare two addresses by prefix and account id, ignoring letter case
fn same_account(a: &str, b: &str) -> bool {
    match (decode_address(a), decode_address(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// How long the node waits before answering a broadcast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BroadcastMode {
    /// Return after CheckTx
    #[default]
    Sync,
    /// Return immediately
    Async,
    /// Return after the transaction is committed in a block
    Commit,
}

impl BroadcastMode {
    /// Tendermint RPC method name
    pub fn rpc_method(self) -> &'static str {
        match self {
            BroadcastMode::Sync => "broadcast_tx_sync",
            BroadcastMode::Async => "broadcast_tx_async",
            BroadcastMode::Commit => "broadcast_tx_commit",
        }
    }

    /// cosmos-sdk `BroadcastMode` enum name for `POST /cosmos/tx/v1beta1/txs`
    pub fn rest_mode(self) -> &'static str {
        match self {
            BroadcastMode::Sync => "BROADCAST_MODE_SYNC",
            BroadcastMode::Async => "BROADCAST_MODE_ASYNC",
            BroadcastMode::Commit => "BROADCAST_MODE_BLOCK",
        }
    }
}

/// Tendermint JSON-RPC request body
pub fn rpc_broadcast_request(tx_bytes: &[u8], mode: BroadcastMode, id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": mode.rpc_method(),
        "params": { "tx": STANDARD.encode(tx_bytes) },
    })
}

/// cosmos-sdk REST (`/cosmos/tx/v1beta1/txs`) request body
pub fn rest_broadcast_body(tx_bytes: &[u8], mode: BroadcastMode) -> Value {
    json!({
        "tx_bytes": STANDARD.encode(tx_bytes),
        "mode": mode.rest_mode(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::deployment::tests::sample_group;
    use crate::message::{build_message, MessageIntent};
    use crate::signer::verify;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockClient {
        account: Option<AccountInfo>,
        fail_broadcast: bool,
        broadcasts: RefCell<Vec<Vec<u8>>>,
    }

    impl ChainClient for MockClient {
        type Error = String;

        fn account(&self, address: &str) -> Result<AccountInfo, String> {
            self.account
                .ok_or_else(|| format!("account {} not found", address))
        }

        fn broadcast(&self, tx_bytes: &[u8]) -> Result<String, String> {
            if self.fail_broadcast {
                return Err("node unavailable".to_string());
            }
            self.broadcasts.borrow_mut().push(tx_bytes.to_vec());
            Ok("HASH".to_string())
        }
    }

    fn deployment(owner: &str) -> UnsignedMessage {
        build_message(MessageIntent::CreateDeployment {
            owner: Some(owner.to_string()),
            dseq: Some(1),
            groups: vec![sample_group()],
            deposit: Some("5000000uakt".to_string()),
            depositor: None,
            version: None,
        })
        .unwrap()
    }

    #[test]
    fn test_submit() {
        let wallet = Wallet::from_private_key(&[1u8; 32]).unwrap();
        let client = MockClient {
            account: Some(AccountInfo {
                account_number: 42,
                sequence: 7,
            }),
            ..Default::default()
        };

        let submitted = submit(
            &client,
            &wallet,
            &deployment(wallet.address()),
            &ChainConfig::default(),
        )
        .unwrap();

        assert_eq!(submitted.tx_hash, "HASH");
        assert_eq!(submitted.transaction.sign_doc().account_number(), 42);
        assert_eq!(submitted.transaction.sign_doc().sequence(), 7);
        assert!(verify(&submitted.transaction, wallet.public_key()));
        assert_eq!(
            client.broadcasts.borrow().as_slice(),
            &[submitted.transaction.to_bytes()]
        );
    }

    #[test]
    fn test_submit_passes_client_errors_through() {
        let wallet = Wallet::from_private_key(&[1u8; 32]).unwrap();
        let message = deployment(wallet.address());

        let err = submit(&MockClient::default(), &wallet, &message, &ChainConfig::default())
            .unwrap_err();
        assert!(matches!(err, SubmitError::Client(ref e) if e.contains("not found")));

        let client = MockClient {
            account: Some(AccountInfo {
                account_number: 1,
                sequence: 0,
            }),
            fail_broadcast: true,
            ..Default::default()
        };
        let err = submit(&client, &wallet, &message, &ChainConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "Chain client error: node unavailable");
    }

    #[test]
    fn test_submit_build_errors() {
        let wallet = Wallet::from_private_key(&[1u8; 32]).unwrap();
        let other = Wallet::from_private_key(&[2u8; 32]).unwrap();
        let client = MockClient {
            account: Some(AccountInfo {
                account_number: 1,
                sequence: 0,
            }),
            ..Default::default()
        };

        // Wrong signer never reaches the client
        let err = submit(
            &client,
            &other,
            &deployment(wallet.address()),
            &ChainConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SubmitError::Build(WasmAkashError::Signing(_))));

        let config = ChainConfig {
            gas_limit: 0,
            ..ChainConfig::default()
        };
        let err = submit(&client, &wallet, &deployment(wallet.address()), &config).unwrap_err();
        assert!(matches!(err, SubmitError::Build(WasmAkashError::Encoding(_))));
        assert!(client.broadcasts.borrow().is_empty());
    }

    #[test]
    fn test_submit_accepts_upper_case_signer() {
        let wallet = Wallet::from_private_key(&[1u8; 32]).unwrap();
        let client = MockClient {
            account: Some(AccountInfo {
                account_number: 42,
                sequence: 0,
            }),
            ..Default::default()
        };

        let owner = wallet.address().to_uppercase();
        let submitted =
            submit(&client, &wallet, &deployment(&owner), &ChainConfig::default()).unwrap();
        assert!(verify(&submitted.transaction, wallet.public_key()));
        assert_eq!(client.broadcasts.borrow().len(), 1);
    }

    #[test]
    fn test_request_bodies() {
        let request = rpc_broadcast_request(&[1, 2, 3], BroadcastMode::Sync, 7);
        assert_eq!(request["method"], "broadcast_tx_sync");
        assert_eq!(request["params"]["tx"], "AQID");
        assert_eq!(request["id"], 7);

        let body = rest_broadcast_body(&[1, 2, 3], BroadcastMode::Commit);
        assert_eq!(body["tx_bytes"], "AQID");
        assert_eq!(body["mode"], "BROADCAST_MODE_BLOCK");
    }

    #[test]
    fn test_account_info_from_json() {
        let info: AccountInfo =
            serde_json::from_str(r#"{ "accountNumber": "42", "sequence": 7 }"#).unwrap();
        assert_eq!(
            info,
            AccountInfo {
                account_number: 42,
                sequence: 7
            }
        );
    }
}

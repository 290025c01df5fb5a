//! End-to-end: intent -> message -> sign doc -> signed transaction

use std::thread;
use wasm_akash::{
    build_message, build_sign_doc, sign, verify, BuildContext, MessageIntent, SignedTransaction,
    UnsignedMessage, Wallet, WasmAkashError,
};

const PRIVATE_KEY: &str = "0101010101010101010101010101010101010101010101010101010101010101";

fn deployment_intent(owner: &str) -> MessageIntent {
    serde_json::from_value(serde_json::json!({
        "type": "createDeployment",
        "owner": owner,
        "dseq": "17",
        "deposit": "10000000uakt",
        "groups": [{
            "name": "web",
            "requirements": { "attributes": { "region": "us-west" } },
            "resources": [{
                "cpuMillis": 500,
                "memoryBytes": 536870912,
                "storage": [{ "name": "default", "sizeBytes": 1073741824 }],
                "endpoints": [{ "kind": "sharedHttp" }],
                "count": 2,
                "price": "0.75uakt"
            }]
        }]
    }))
    .unwrap()
}

fn deployment(wallet: &Wallet) -> UnsignedMessage {
    build_message(deployment_intent(wallet.address())).unwrap()
}

#[test]
fn test_create_deployment_end_to_end() {
    let wallet = Wallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    let message = deployment(&wallet);

    let context = BuildContext::new(42, 7, *wallet.public_key());
    assert_eq!(context.chain_id, "akashnet-2");
    let doc = build_sign_doc(&message, &context).unwrap();
    let tx = sign(&doc, &wallet).unwrap();

    assert_eq!(tx.public_key(), wallet.public_key());
    assert_eq!(tx.sign_doc().public_key(), Some(wallet.public_key()));
    assert!(verify(&tx, wallet.public_key()));

    // Survives the trip through TxRaw bytes
    let decoded = SignedTransaction::from_tx_raw(&tx.to_bytes(), "akashnet-2", 42).unwrap();
    assert!(verify(&decoded, wallet.public_key()));
    assert_eq!(decoded.tx_hash(), tx.tx_hash());
}

#[test]
fn test_sign_doc_is_byte_identical() {
    let wallet = Wallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    let context = BuildContext::from_json(&format!(
        r#"{{ "accountNumber": 42, "sequence": "7", "publicKey": "{}" }}"#,
        wallet.public_key()
    ))
    .unwrap();

    let a = build_sign_doc(&deployment(&wallet), &context).unwrap();
    let b = build_sign_doc(&deployment(&wallet), &context).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn test_verify_with_other_key_fails() {
    let wallet = Wallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    let other = Wallet::from_private_key(&[9u8; 32]).unwrap();

    let context = BuildContext::new(42, 7, *wallet.public_key());
    let doc = build_sign_doc(&deployment(&wallet), &context).unwrap();
    let tx = sign(&doc, &wallet).unwrap();
    assert!(!verify(&tx, other.public_key()));
}

#[test]
fn test_rejects_bad_deposits() {
    let wallet = Wallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    for deposit in ["0uakt", "-1uakt", "10000000uusd"] {
        let mut intent = deployment_intent(wallet.address());
        if let MessageIntent::CreateDeployment { deposit: d, .. } = &mut intent {
            *d = Some(deposit.to_string());
        }
        assert!(
            matches!(build_message(intent), Err(WasmAkashError::Validation(_))),
            "{}",
            deposit
        );
    }
}

#[test]
fn test_negative_sequence_is_encoding_error() {
    let wallet = Wallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    let err = BuildContext::from_json(&format!(
        r#"{{ "accountNumber": 42, "sequence": -7, "publicKey": "{}" }}"#,
        wallet.public_key()
    ))
    .unwrap_err();
    assert!(matches!(err, WasmAkashError::Encoding(_)));
}

#[test]
fn test_missing_signer_key_is_encoding_error() {
    let err = BuildContext::from_json(r#"{ "accountNumber": 42, "sequence": 7 }"#).unwrap_err();
    assert!(matches!(err, WasmAkashError::Encoding(_)));
}

#[test]
fn test_mnemonic_wallet_end_to_end() {
    let phrase = "abandon abandon abandon abandon abandon abandon \
        abandon abandon abandon abandon abandon about";
    let wallet = Wallet::from_mnemonic(phrase, None).unwrap();
    assert_eq!(wallet.address(), "akash19rl4cm2hmr8afy4kldpxz3fka4jguq0a3mq6x0");

    let context = BuildContext::new(3, 0, *wallet.public_key());
    let doc = build_sign_doc(&deployment(&wallet), &context).unwrap();
    let tx = sign(&doc, &wallet).unwrap();

    let decoded = SignedTransaction::from_tx_raw(&tx.to_bytes(), "akashnet-2", 3).unwrap();
    assert_eq!(decoded.public_key(), wallet.public_key());
    assert!(verify(&decoded, wallet.public_key()));
}

#[test]
fn test_dispose_then_sign() {
    let mut wallet = Wallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    let context = BuildContext::new(42, 7, *wallet.public_key());
    let doc = build_sign_doc(&deployment(&wallet), &context).unwrap();

    wallet.dispose();
    assert!(matches!(
        sign(&doc, &wallet),
        Err(WasmAkashError::Signing(_))
    ));
}

#[test]
fn test_concurrent_signing() {
    let wallet = Wallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    let message = deployment(&wallet);

    let results: Vec<bool> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8u64)
            .map(|sequence| {
                let wallet = &wallet;
                let message = &message;
                scope.spawn(move || {
                    let context = BuildContext::new(42, sequence, *wallet.public_key());
                    let doc = build_sign_doc(message, &context).unwrap();
                    let tx = sign(&doc, wallet).unwrap();
                    verify(&tx, wallet.public_key())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.len(), 8);
    assert!(results.into_iter().all(|ok| ok));
}

//! JS-facing flow through the #[wasm_bindgen] layer (run with wasm-pack test)
#![cfg(target_arch = "wasm32")]

use wasm_akash::wasm::{BuilderNamespace, WasmSignedTransaction, WasmWallet};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

const PRIVATE_KEY: &str = "0101010101010101010101010101010101010101010101010101010101010101";
const PROVIDER: &str = "akash19rl4cm2hmr8afy4kldpxz3fka4jguq0a3mq6x0";

fn to_js(value: serde_json::Value) -> JsValue {
    use serde::Serialize;
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn lease_intent(owner: &str) -> JsValue {
    to_js(serde_json::json!({
        "type": "createLease",
        "bidId": {
            "owner": owner,
            "dseq": 17,
            "gseq": 1,
            "oseq": 1,
            "provider": PROVIDER
        }
    }))
}

#[wasm_bindgen_test]
fn test_build_sign_verify() {
    let wallet = WasmWallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    let message = BuilderNamespace::build_message_wasm(lease_intent(&wallet.address())).unwrap();
    assert_eq!(message.kind(), "createLease");

    let context = to_js(serde_json::json!({
        "accountNumber": 42,
        "sequence": 7,
        "publicKey": wallet.public_key_hex()
    }));
    let doc = BuilderNamespace::build_sign_doc_wasm(&message, context).unwrap();
    assert_eq!(doc.chain_id(), "akashnet-2");

    let tx = BuilderNamespace::sign_wasm(&doc, &wallet).unwrap();
    assert!(BuilderNamespace::verify_wasm(&tx, &tx.public_key()));
    assert!(!BuilderNamespace::verify_wasm(&tx, &[2u8; 33]));
    assert_eq!(tx.tx_hash().len(), 64);

    let decoded = WasmSignedTransaction::from_bytes(&tx.to_bytes(), "akashnet-2", 42).unwrap();
    assert_eq!(decoded.public_key(), tx.public_key());
    assert_eq!(decoded.tx_hash(), tx.tx_hash());
}

#[wasm_bindgen_test]
fn test_errors_surface_as_js_errors() {
    let mut wallet = WasmWallet::from_private_key_hex(PRIVATE_KEY).unwrap();
    let message = BuilderNamespace::build_message_wasm(lease_intent(&wallet.address())).unwrap();
    let context = to_js(serde_json::json!({
        "accountNumber": 42,
        "sequence": -1,
        "publicKey": wallet.public_key_hex()
    }));
    assert!(BuilderNamespace::build_sign_doc_wasm(&message, context).is_err());

    // The signer key is required
    let context = to_js(serde_json::json!({ "accountNumber": 42, "sequence": 7 }));
    assert!(BuilderNamespace::build_sign_doc_wasm(&message, context).is_err());

    let context = to_js(serde_json::json!({
        "accountNumber": 42,
        "sequence": 7,
        "publicKey": wallet.public_key_hex()
    }));
    let doc = BuilderNamespace::build_sign_doc_wasm(&message, context).unwrap();
    wallet.dispose();
    assert!(wallet.is_disposed());
    assert!(BuilderNamespace::sign_wasm(&doc, &wallet).is_err());
}

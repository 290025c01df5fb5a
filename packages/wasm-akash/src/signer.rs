//! secp256k1 signing and verification of sign docs
//!
//! Signatures are ECDSA over SHA-256 of the sign doc bytes with RFC 6979
//! nonces, low-S normalized and encoded as 64-byte `r || s`. Verification
//! rejects high-S signatures the same way the cosmos-sdk ante handler does.

use crate::error::WasmAkashError;
use crate::sign_doc::SignDoc;
use crate::transaction::{SignedTransaction, SIGNATURE_LENGTH};
use crate::wallet::{PublicKey, Wallet};
use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::Signature;

/// Sign a sign doc with the wallet's private key
///
/// # Errors
/// `WasmAkashError::Signing` when the wallet has been disposed, or when the
/// sign doc embeds a signer public key that is not the wallet's.
pub fn sign(sign_doc: &SignDoc, wallet: &Wallet) -> Result<SignedTransaction, WasmAkashError> {
    let signing_key = wallet.signing_key()?;

    if let Some(embedded) = sign_doc.public_key() {
        if embedded != wallet.public_key() {
            return Err(WasmAkashError::signing(format!(
                "Sign doc is for public key {}, wallet holds {}",
                embedded,
                wallet.public_key()
            )));
        }
    }

    let signature: Signature = signing_key
        .try_sign(sign_doc.as_bytes())
        .map_err(|e| WasmAkashError::signing(format!("Failed to sign: {}", e)))?;
    let signature = signature.normalize_s().unwrap_or(signature);

    let mut bytes = [0u8; SIGNATURE_LENGTH];
    bytes.copy_from_slice(&signature.to_bytes());

    tracing::debug!(
        address = wallet.address(),
        chain_id = sign_doc.chain_id(),
        sequence = sign_doc.sequence(),
        "signed sign doc"
    );
    Ok(SignedTransaction::new(
        sign_doc.clone(),
        bytes,
        *wallet.public_key(),
    ))
}

/// Check a signed transaction against the public key the caller expects
///
/// Returns `false` on any mismatch or malformed input; never fails.
pub fn verify(transaction: &SignedTransaction, expected_public_key: &PublicKey) -> bool {
    if transaction.public_key() != expected_public_key {
        return false;
    }
    if let Some(embedded) = transaction.sign_doc().public_key() {
        if embedded != expected_public_key {
            return false;
        }
    }

    let message = transaction.sign_doc().canonical_bytes();
    verify_bytes(&message, transaction.signature(), expected_public_key)
}

/// Verify a compact signature over arbitrary bytes
pub fn verify_bytes(message: &[u8], signature: &[u8], public_key: &PublicKey) -> bool {
    let Some(verifying_key) = public_key.verifying_key() else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        return false;
    };
    // High-S signatures are malleable
    if signature.normalize_s().is_some() {
        return false;
    }
    verifying_key.verify(message, &signature).is_ok()
}

//! wasm-akash: WASM module for Akash Network transaction operations
//!
//! This crate provides:
//! - Wallets (raw key, hex or BIP-39 mnemonic) with bech32 `akash1...` addresses
//! - Message building from intents (create deployment, create bid, create lease)
//! - SIGN_MODE_DIRECT sign docs, secp256k1 signing and verification
//! - `TxRaw` serialization and broadcast request bodies
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//! - **Core layer** (`src/*.rs`): Pure Rust logic, no WASM dependencies
//! - **WASM layer** (`src/wasm/*.rs`): Thin wrappers with `#[wasm_bindgen]`
//!
//! # Flow
//!
//! ```text
//! MessageIntent --build_message--> UnsignedMessage
//!     --build_sign_doc(context)--> SignDoc
//!     --sign(wallet)--> SignedTransaction --to_bytes--> broadcast
//! ```

pub mod address;
pub mod broadcast;
pub mod coin;
pub mod config;
pub mod error;
pub mod message;
pub mod proto;
pub mod sign_doc;
pub mod signer;
pub mod transaction;
pub mod wallet;
pub mod wasm;

// Re-export main types for convenience
pub use address::{decode_address, encode_address, validate_address};
pub use broadcast::{submit, AccountInfo, BroadcastMode, ChainClient, SubmitError, Submitted};
pub use coin::{Coin, DecCoin, Denom};
pub use config::ChainConfig;
pub use error::WasmAkashError;
pub use message::{build_message, MessageIntent, MessageKind, UnsignedMessage};
pub use sign_doc::{build_sign_doc, BuildContext, SignDoc};
pub use signer::{sign, verify};
pub use transaction::SignedTransaction;
pub use wallet::{PublicKey, Wallet};

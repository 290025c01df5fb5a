//! WASM bindings for wasm-akash
//!
//! This module contains thin wrappers with #[wasm_bindgen] that delegate
//! to the core Rust implementations.

pub mod builder;
pub mod transaction;
pub mod wallet;

// Re-export WASM types
pub use builder::BuilderNamespace;
pub use transaction::{WasmMessage, WasmSignDoc, WasmSignedTransaction};
pub use wallet::WasmWallet;

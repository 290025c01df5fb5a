//! Error types for wasm-akash
//!
//! Every failure is a caller error: none of these are transient, so nothing in
//! this crate retries.

use wasm_bindgen::prelude::*;

/// Main error type for wasm-akash operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WasmAkashError {
    /// Malformed or missing input field (bad address, amount, denomination, ...)
    #[error("Validation error: {0}")]
    Validation(String),
    /// A value cannot be represented in the canonical wire form
    #[error("Encoding error: {0}")]
    Encoding(String),
    /// Key material is unusable (disposed, malformed, or mismatched)
    #[error("Signing error: {0}")]
    Signing(String),
}

impl WasmAkashError {
    pub fn validation(msg: impl Into<String>) -> Self {
        WasmAkashError::Validation(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        WasmAkashError::Encoding(msg.into())
    }

    pub fn signing(msg: impl Into<String>) -> Self {
        WasmAkashError::Signing(msg.into())
    }
}

// REQUIRED: Converts to JS Error with stack trace
impl From<WasmAkashError> for JsValue {
    fn from(err: WasmAkashError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WasmAkashError::validation("deposit must be positive");
        assert_eq!(err.to_string(), "Validation error: deposit must be positive");

        let err = WasmAkashError::signing("wallet disposed");
        assert_eq!(err.to_string(), "Signing error: wallet disposed");
    }
}

//! Test vector types for AES Key Wrap tests.
//!
//! The success vectors are the RFC 3394 section 4 examples for the key
//! sizes this crate registers; the failure vectors reuse them with a bad
//! algorithm, key or blob.

// Some fields are only used for diagnostics
#![allow(dead_code)]

use serde::Deserialize;

/// A test vector suite (top-level JSON structure).
#[derive(Debug, Deserialize)]
pub struct TestVectorSuite<T> {
    pub name: String,
    pub tests: Vec<T>,
}

/// Test vector for a key wrap / unwrap pair.
#[derive(Debug, Deserialize)]
pub struct KeyWrapTestVector {
    pub name: String,
    #[serde(rename = "expect-fail")]
    pub expect_fail: bool,
    #[serde(default)]
    pub comment: Option<String>,
    /// Key wrap algorithm identifier
    pub alg: String,
    /// Hex-encoded key encryption key
    pub kek: String,
    /// Hex-encoded plaintext key data (null for fail tests)
    pub key: Option<String>,
    /// Hex-encoded wrapped key
    pub wrapped: String,
    /// Expected error kind for fail tests
    pub error: Option<String>,
}

/// Decode a hex string to bytes.
/// Returns `None` if the string is not valid hex.
pub fn hex_decode(s: &str) -> Option<Vec<u8>> {
    hex::decode(s).ok()
}

/// Load a test vector suite from a JSON file.
pub fn load_vectors<T: serde::de::DeserializeOwned>(path: &str) -> TestVectorSuite<T> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read test vector file {path}: {e}"));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse test vector file {path}: {e}"))
}

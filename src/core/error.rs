//! Error types for key wrap operations.
//!
//! Messages for unwrap failures are intentionally vague: a wrong key and a
//! tampered blob produce the same error.

use thiserror::Error;

/// Errors that can occur when constructing or using a key wrap provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyWrapError {
    /// A required argument was absent or empty. Carries the argument name.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The algorithm identifier is not a registered key wrap algorithm.
    #[error("Unsupported key wrap algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The key cannot supply raw symmetric key material.
    #[error("Key does not provide symmetric key material")]
    InvalidKeyType,

    /// The key length does not match the algorithm's required length.
    #[error("Invalid key size: algorithm requires {expected} bits, key has {actual} bits")]
    InvalidKeySize {
        /// Bits required by the algorithm.
        expected: usize,
        /// Bits supplied by the key.
        actual: usize,
    },

    /// Payload is not block aligned or is shorter than the minimum.
    #[error("Invalid input length: {0} bytes")]
    InvalidInputLength(usize),

    /// The unwrapped integrity register did not match the initial value.
    /// Intentionally vague for security.
    #[error("Key unwrap integrity check failed")]
    IntegrityCheckFailed,
}

/// Result type alias for key wrap operations.
pub type KeyWrapResult<T> = Result<T, KeyWrapError>;

//! Key wrap algorithm identifiers and the algorithm registry.
//!
//! The registry is a static table mapping an identifier to the AES variant
//! and the key length it requires. Supporting another key wrap algorithm
//! means adding a row to [`REGISTRY`]; the validation and transform paths
//! read the table and never branch on identifiers.

use core::fmt::{self, Display};

// =============================================================================
// Identifiers
// =============================================================================

/// AES Key Wrap with a 128-bit key (RFC 7518).
pub const A128KW: &str = "A128KW";

/// AES Key Wrap with a 256-bit key (RFC 7518).
pub const A256KW: &str = "A256KW";

/// AES Key Wrap with a 128-bit key (XML Encryption).
pub const AES128_KW: &str = "http://www.w3.org/2001/04/xmlenc#kw-aes128";

/// AES Key Wrap with a 256-bit key (XML Encryption).
pub const AES256_KW: &str = "http://www.w3.org/2001/04/xmlenc#kw-aes256";

/// AES-CBC + HMAC-SHA256 content encryption. Not a key wrap algorithm.
pub const A128CBC_HS256: &str = "A128CBC-HS256";

/// AES-CBC + HMAC-SHA512 content encryption. Not a key wrap algorithm.
pub const A256CBC_HS512: &str = "A256CBC-HS512";

/// AES-GCM content encryption with a 128-bit key. Not a key wrap algorithm.
pub const A128GCM: &str = "A128GCM";

/// AES-GCM content encryption with a 256-bit key. Not a key wrap algorithm.
pub const A256GCM: &str = "A256GCM";

/// AES-128-CBC (XML Encryption). Not a key wrap algorithm.
pub const AES128_ENCRYPTION: &str = "http://www.w3.org/2001/04/xmlenc#aes128-cbc";

/// AES-256-CBC (XML Encryption). Not a key wrap algorithm.
pub const AES256_ENCRYPTION: &str = "http://www.w3.org/2001/04/xmlenc#aes256-cbc";

// =============================================================================
// Registry
// =============================================================================

/// The AES block cipher a key wrap algorithm runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AesVariant {
    /// AES with a 128-bit key.
    Aes128,
    /// AES with a 256-bit key.
    Aes256,
}

impl AesVariant {
    /// Key length in bytes.
    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes256 => 32,
        }
    }
}

/// A registered key wrap algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyWrapAlgorithm {
    /// The algorithm identifier as it appears in `alg` headers.
    pub name: &'static str,
    /// Required key length in bits.
    pub key_size_bits: usize,
    /// Block cipher used for the 64-bit chaining.
    pub cipher: AesVariant,
}

impl Display for KeyWrapAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Every supported key wrap algorithm.
pub static REGISTRY: &[KeyWrapAlgorithm] = &[
    KeyWrapAlgorithm {
        name: A128KW,
        key_size_bits: 128,
        cipher: AesVariant::Aes128,
    },
    KeyWrapAlgorithm {
        name: A256KW,
        key_size_bits: 256,
        cipher: AesVariant::Aes256,
    },
    #[cfg(feature = "xmlenc")]
    KeyWrapAlgorithm {
        name: AES128_KW,
        key_size_bits: 128,
        cipher: AesVariant::Aes128,
    },
    #[cfg(feature = "xmlenc")]
    KeyWrapAlgorithm {
        name: AES256_KW,
        key_size_bits: 256,
        cipher: AesVariant::Aes256,
    },
];

/// Looks up a key wrap algorithm by its exact identifier.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static KeyWrapAlgorithm> {
    REGISTRY.iter().find(|alg| alg.name == name)
}

/// Iterates over the identifiers of every registered algorithm.
pub fn supported_algorithms() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|alg| alg.name)
}

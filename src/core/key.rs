//! Security keys accepted by key wrap providers.
//!
//! A provider only needs two things from a key: its length in bits and its
//! raw symmetric bytes. [`SecurityKey`] captures that capability. Key
//! representations that carry no octet material (RSA or EC JSON Web Keys)
//! keep the default [`SecurityKey::symmetric_key`] and are rejected with
//! [`KeyWrapError::InvalidKeyType`].

use core::fmt::{self, Debug};

use base64::prelude::*;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::core::error::{KeyWrapError, KeyWrapResult};

/// Capability of a key object to take part in key wrapping.
pub trait SecurityKey: Debug + Send + Sync {
    /// The key length in bits.
    fn key_size(&self) -> usize;

    /// Returns a copy of the raw symmetric key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyWrapError::InvalidKeyType`] if the key has no symmetric
    /// octet material.
    fn symmetric_key(&self) -> KeyWrapResult<Zeroizing<Vec<u8>>> {
        Err(KeyWrapError::InvalidKeyType)
    }

    /// An optional identifier for the key.
    fn key_id(&self) -> Option<&str> {
        None
    }
}

// =============================================================================
// SymmetricSecurityKey
// =============================================================================

/// Raw symmetric key material.
///
/// # Security
///
/// - Key material is zeroized on drop
/// - Debug output redacts the key
/// - Equality comparison uses constant-time comparison
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricSecurityKey {
    key: Vec<u8>,
    #[zeroize(skip)]
    key_id: Option<String>,
}

impl SymmetricSecurityKey {
    /// Creates a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyWrapError::InvalidArgument`] if `key` is empty.
    pub fn new(key: impl Into<Vec<u8>>) -> KeyWrapResult<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(KeyWrapError::InvalidArgument("key"));
        }
        Ok(Self { key, key_id: None })
    }

    /// Attaches a key identifier.
    #[must_use]
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Returns a reference to the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }
}

impl From<[u8; 16]> for SymmetricSecurityKey {
    fn from(key: [u8; 16]) -> Self {
        Self {
            key: key.to_vec(),
            key_id: None,
        }
    }
}

impl From<[u8; 32]> for SymmetricSecurityKey {
    fn from(key: [u8; 32]) -> Self {
        Self {
            key: key.to_vec(),
            key_id: None,
        }
    }
}

impl SecurityKey for SymmetricSecurityKey {
    fn key_size(&self) -> usize {
        self.key.len() * 8
    }

    fn symmetric_key(&self) -> KeyWrapResult<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(self.key.clone()))
    }

    fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }
}

impl Debug for SymmetricSecurityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricSecurityKey")
            .field("key_size", &self.key_size())
            .field("key_id", &self.key_id)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl PartialEq for SymmetricSecurityKey {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.key.ct_eq(&other.key).into()
    }
}

impl Eq for SymmetricSecurityKey {}

// =============================================================================
// JsonWebKey
// =============================================================================

/// JSON Web Key (RFC 7517), limited to the members relevant for key sizing.
///
/// Only `oct` keys carry symmetric material; `RSA` and `EC` keys report a
/// size but fail [`SecurityKey::symmetric_key`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKey {
    /// Key type: `oct`, `RSA` or `EC`.
    pub kty: String,
    /// Key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Intended algorithm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Symmetric key value, base64url without padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<String>,
    /// RSA modulus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA public exponent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    /// EC curve name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// EC x coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// EC y coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

impl JsonWebKey {
    /// The `kty` value of symmetric keys.
    pub const OCTET: &'static str = "oct";
    /// The `kty` value of RSA keys.
    pub const RSA: &'static str = "RSA";
    /// The `kty` value of elliptic curve keys.
    pub const EC: &'static str = "EC";

    /// Creates an `oct` key holding `key`.
    #[must_use]
    pub fn from_symmetric(key: &[u8]) -> Self {
        Self {
            kty: Self::OCTET.to_string(),
            k: Some(BASE64_URL_SAFE_NO_PAD.encode(key)),
            ..Self::default()
        }
    }

    /// Attaches a key identifier.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    fn decoded_len(member: Option<&String>) -> usize {
        member
            .and_then(|value| BASE64_URL_SAFE_NO_PAD.decode(value).ok())
            .map_or(0, |bytes| Zeroizing::new(bytes).len())
    }
}

impl SecurityKey for JsonWebKey {
    fn key_size(&self) -> usize {
        match self.kty.as_str() {
            Self::OCTET => Self::decoded_len(self.k.as_ref()) * 8,
            Self::RSA => Self::decoded_len(self.n.as_ref()) * 8,
            Self::EC => match self.crv.as_deref() {
                Some("P-256") => 256,
                Some("P-384") => 384,
                Some("P-521") => 521,
                _ => 0,
            },
            _ => 0,
        }
    }

    fn symmetric_key(&self) -> KeyWrapResult<Zeroizing<Vec<u8>>> {
        if self.kty != Self::OCTET {
            return Err(KeyWrapError::InvalidKeyType);
        }
        let encoded = self.k.as_ref().ok_or(KeyWrapError::InvalidKeyType)?;
        let key = BASE64_URL_SAFE_NO_PAD
            .decode(encoded)
            .map(Zeroizing::new)
            .map_err(|_| KeyWrapError::InvalidKeyType)?;
        if key.is_empty() {
            return Err(KeyWrapError::InvalidKeyType);
        }
        Ok(key)
    }

    fn key_id(&self) -> Option<&str> {
        self.kid.as_deref()
    }
}

impl Debug for JsonWebKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonWebKey")
            .field("kty", &self.kty)
            .field("kid", &self.kid)
            .field("alg", &self.alg)
            .field("k", &self.k.as_ref().map(|_| "[REDACTED]"))
            .field("crv", &self.crv)
            .finish_non_exhaustive()
    }
}

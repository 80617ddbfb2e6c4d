//! Key wrap providers.
//!
//! [`KeyWrapProvider`] is the seam callers program against. Alternate
//! implementations (instrumented, hardware-backed) must keep the same
//! contract as [`SymmetricKeyWrapProvider`]:
//!
//! - `wrap_key` output is `input.len() + 8` bytes and deterministic
//! - `unwrap_key(wrap_key(x)) == x`
//! - a tampered blob or wrong key fails with
//!   [`KeyWrapError::IntegrityCheckFailed`], never with garbage plaintext

use core::fmt::{self, Debug};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::algorithm::{lookup, KeyWrapAlgorithm};
use crate::core::error::{KeyWrapError, KeyWrapResult};
use crate::core::key::SecurityKey;
use crate::core::operations::kw::{self, Kek};

/// Wraps and unwraps key material under a key bound at construction.
pub trait KeyWrapProvider: Send + Sync {
    /// The algorithm identifier the provider was created with.
    fn algorithm(&self) -> &str;

    /// The key the provider was created with.
    fn key(&self) -> &dyn SecurityKey;

    /// Caller-supplied correlation label. Not used by the transform.
    fn context(&self) -> &str;

    /// Wraps `key_bytes`.
    ///
    /// # Errors
    ///
    /// - [`KeyWrapError::InvalidArgument`] if `key_bytes` is empty
    /// - [`KeyWrapError::InvalidInputLength`] if its length is not a multiple of 8
    fn wrap_key(&self, key_bytes: &[u8]) -> KeyWrapResult<Vec<u8>>;

    /// Unwraps `wrapped_key`.
    ///
    /// # Errors
    ///
    /// - [`KeyWrapError::InvalidArgument`] if `wrapped_key` is empty
    /// - [`KeyWrapError::InvalidInputLength`] if it is not block aligned or
    ///   shorter than 16 bytes
    /// - [`KeyWrapError::IntegrityCheckFailed`] if the blob was not produced
    ///   by this key and algorithm
    fn unwrap_key(&self, wrapped_key: &[u8]) -> KeyWrapResult<Zeroizing<Vec<u8>>>;
}

/// AES Key Wrap provider over a symmetric key.
///
/// # Example
///
/// ```rust
/// use keywrap::core::algorithm::A128KW;
/// use keywrap::core::key::SymmetricSecurityKey;
/// use keywrap::core::provider::{KeyWrapProvider, SymmetricKeyWrapProvider};
///
/// let key = SymmetricSecurityKey::from([0u8; 16]);
/// let provider = SymmetricKeyWrapProvider::new(&key, A128KW)
///     .expect("A128KW accepts a 128-bit key");
///
/// let wrapped = provider.wrap_key(&[0x42u8; 16]).expect("wrap should succeed");
/// assert_eq!(wrapped.len(), 24);
///
/// let unwrapped = provider.unwrap_key(&wrapped).expect("unwrap should succeed");
/// assert_eq!(unwrapped.as_slice(), &[0x42u8; 16]);
/// ```
pub struct SymmetricKeyWrapProvider<'k> {
    key: &'k dyn SecurityKey,
    algorithm: String,
    registered: &'static KeyWrapAlgorithm,
    key_bytes: Zeroizing<Vec<u8>>,
    context: String,
}

impl<'k> SymmetricKeyWrapProvider<'k> {
    /// Creates a provider for `key` and `algorithm`.
    ///
    /// # Errors
    ///
    /// - [`KeyWrapError::InvalidArgument`] if `algorithm` is empty
    /// - [`KeyWrapError::UnsupportedAlgorithm`] if `algorithm` is not a
    ///   registered key wrap algorithm
    /// - [`KeyWrapError::InvalidKeyType`] if `key` has no symmetric material
    /// - [`KeyWrapError::InvalidKeySize`] if the key length does not match
    ///   the algorithm
    pub fn new(key: &'k dyn SecurityKey, algorithm: &str) -> KeyWrapResult<Self> {
        Self::from_parts(Some(key), Some(algorithm))
    }

    /// Creates a provider from optional parts, as read from a JWE header or
    /// key set lookup. A missing key is reported before a missing algorithm.
    ///
    /// # Errors
    ///
    /// Same as [`SymmetricKeyWrapProvider::new`], plus
    /// [`KeyWrapError::InvalidArgument`] for an absent key or algorithm.
    pub fn from_parts(
        key: Option<&'k dyn SecurityKey>,
        algorithm: Option<&str>,
    ) -> KeyWrapResult<Self> {
        let key = key.ok_or(KeyWrapError::InvalidArgument("key"))?;
        let algorithm = algorithm.unwrap_or_default();

        match resolve(key, algorithm) {
            Ok((registered, key_bytes)) => {
                debug!(
                    algorithm,
                    key_size = key.key_size(),
                    key_id = key.key_id(),
                    "created key wrap provider"
                );
                Ok(Self {
                    key,
                    algorithm: algorithm.to_string(),
                    registered,
                    key_bytes,
                    context: String::new(),
                })
            }
            Err(err) => {
                debug!(algorithm, error = %err, "rejected key wrap provider");
                Err(err)
            }
        }
    }

    /// Returns `true` if a provider could be created for `key` and
    /// `algorithm`.
    #[must_use]
    pub fn is_supported_algorithm(key: &dyn SecurityKey, algorithm: &str) -> bool {
        resolve(key, algorithm).is_ok()
    }

    /// Sets the context label and returns the provider.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Replaces the context label.
    pub fn set_context(&mut self, context: impl Into<String>) {
        self.context = context.into();
    }

    /// The registry entry backing this provider.
    #[must_use]
    pub const fn registered_algorithm(&self) -> &'static KeyWrapAlgorithm {
        self.registered
    }

    fn kek(&self) -> KeyWrapResult<Kek> {
        Kek::new(self.registered.cipher, &self.key_bytes)
    }
}

/// Validates `key` against `algorithm` and extracts the raw key bytes.
fn resolve(
    key: &dyn SecurityKey,
    algorithm: &str,
) -> KeyWrapResult<(&'static KeyWrapAlgorithm, Zeroizing<Vec<u8>>)> {
    if algorithm.is_empty() {
        return Err(KeyWrapError::InvalidArgument("algorithm"));
    }
    let registered = lookup(algorithm)
        .ok_or_else(|| KeyWrapError::UnsupportedAlgorithm(algorithm.to_string()))?;

    let key_bytes = key.symmetric_key()?;

    let expected = registered.key_size_bits;
    for actual in [key.key_size(), key_bytes.len() * 8] {
        if actual != expected {
            return Err(KeyWrapError::InvalidKeySize { expected, actual });
        }
    }

    Ok((registered, key_bytes))
}

impl KeyWrapProvider for SymmetricKeyWrapProvider<'_> {
    fn algorithm(&self) -> &str {
        &self.algorithm
    }

    fn key(&self) -> &dyn SecurityKey {
        self.key
    }

    fn context(&self) -> &str {
        &self.context
    }

    fn wrap_key(&self, key_bytes: &[u8]) -> KeyWrapResult<Vec<u8>> {
        kw::wrap(&self.kek()?, key_bytes)
    }

    fn unwrap_key(&self, wrapped_key: &[u8]) -> KeyWrapResult<Zeroizing<Vec<u8>>> {
        let result = kw::unwrap(&self.kek()?, wrapped_key);
        if let Err(KeyWrapError::IntegrityCheckFailed) = result {
            warn!(
                algorithm = %self.algorithm,
                context = %self.context,
                "key unwrap integrity check failed"
            );
        }
        result
    }
}

impl Debug for SymmetricKeyWrapProvider<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKeyWrapProvider")
            .field("algorithm", &self.algorithm)
            .field("key", &self.key)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

//! Provider factory with a hook for custom backends.
//!
//! The factory hands out boxed [`KeyWrapProvider`]s. A registered
//! [`CustomCryptoProvider`] is consulted first, which lets callers intercept
//! provider creation for instrumentation or alternate backends without
//! changing call sites.

use std::sync::Arc;

use tracing::debug;

use crate::core::error::{KeyWrapError, KeyWrapResult};
use crate::core::key::SecurityKey;
use crate::core::provider::{KeyWrapProvider, SymmetricKeyWrapProvider};

/// Source of alternate key wrap providers.
pub trait CustomCryptoProvider: Send + Sync {
    /// Returns `true` if this provider handles `algorithm`.
    fn is_supported_algorithm(&self, algorithm: &str) -> bool;

    /// Creates a provider for `key` and `algorithm`.
    ///
    /// # Errors
    ///
    /// Implementation specific; should mirror the validation errors of
    /// [`SymmetricKeyWrapProvider::new`].
    fn create<'k>(
        &self,
        key: &'k dyn SecurityKey,
        algorithm: &str,
    ) -> KeyWrapResult<Box<dyn KeyWrapProvider + 'k>>;
}

/// Creates key wrap providers.
#[derive(Clone, Default)]
pub struct CryptoProviderFactory {
    custom: Option<Arc<dyn CustomCryptoProvider>>,
}

impl CryptoProviderFactory {
    /// Creates a factory that only builds [`SymmetricKeyWrapProvider`]s.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a custom provider that takes precedence for the algorithms
    /// it claims.
    #[must_use]
    pub fn with_custom_provider(mut self, custom: Arc<dyn CustomCryptoProvider>) -> Self {
        self.custom = Some(custom);
        self
    }

    /// Returns `true` if a provider can be created for `key` and `algorithm`.
    #[must_use]
    pub fn is_supported_algorithm(&self, key: &dyn SecurityKey, algorithm: &str) -> bool {
        if let Some(custom) = &self.custom {
            if custom.is_supported_algorithm(algorithm) {
                return true;
            }
        }
        SymmetricKeyWrapProvider::is_supported_algorithm(key, algorithm)
    }

    /// Creates a key wrap provider for `key` and `algorithm`.
    ///
    /// # Errors
    ///
    /// - [`KeyWrapError::InvalidArgument`] if `algorithm` is empty
    /// - any error from the custom provider or
    ///   [`SymmetricKeyWrapProvider::new`]
    pub fn create_key_wrap_provider<'k>(
        &self,
        key: &'k dyn SecurityKey,
        algorithm: &str,
    ) -> KeyWrapResult<Box<dyn KeyWrapProvider + 'k>> {
        if algorithm.is_empty() {
            return Err(KeyWrapError::InvalidArgument("algorithm"));
        }

        if let Some(custom) = &self.custom {
            if custom.is_supported_algorithm(algorithm) {
                debug!(algorithm, "using custom key wrap provider");
                return custom.create(key, algorithm);
            }
        }

        Ok(Box::new(SymmetricKeyWrapProvider::new(key, algorithm)?))
    }
}

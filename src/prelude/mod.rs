//! Ergonomic imports.
//!
//! ```rust
//! use keywrap::prelude::*;
//!
//! let key = SymmetricSecurityKey::from([0u8; 16]);
//! assert!(CryptoProviderFactory::new().is_supported_algorithm(&key, A128KW));
//! ```

pub use crate::core::algorithm::{A128KW, A256KW};
#[cfg(feature = "xmlenc")]
pub use crate::core::algorithm::{AES128_KW, AES256_KW};
pub use crate::core::error::{KeyWrapError, KeyWrapResult};
pub use crate::core::factory::{CryptoProviderFactory, CustomCryptoProvider};
pub use crate::core::key::{JsonWebKey, SecurityKey, SymmetricSecurityKey};
pub use crate::core::provider::{KeyWrapProvider, SymmetricKeyWrapProvider};

//! AES Key Wrap providers for identity and token libraries.
//!
//! A key wrap provider is bound to one key and one algorithm at
//! construction. Construction validates that the algorithm is a registered
//! key wrap algorithm and that the key supplies symmetric material of
//! exactly the required length; after that the provider wraps and unwraps
//! key material with RFC 3394 AES Key Wrap.
//!
//! # Quick Start
//!
//! ```rust
//! use keywrap::core::algorithm::A256KW;
//! use keywrap::{KeyWrapProvider, SymmetricKeyWrapProvider, SymmetricSecurityKey};
//!
//! let kek = SymmetricSecurityKey::from([0x42u8; 32]);
//! let provider = SymmetricKeyWrapProvider::new(&kek, A256KW)
//!     .expect("A256KW accepts a 256-bit key");
//!
//! let cek = [0x13u8; 32];
//! let wrapped = provider.wrap_key(&cek).expect("wrap should succeed");
//! assert_eq!(wrapped.len(), cek.len() + 8);
//!
//! let unwrapped = provider.unwrap_key(&wrapped).expect("unwrap should succeed");
//! assert_eq!(unwrapped.as_slice(), &cek);
//! ```
//!
//! # Algorithms
//!
//! | Identifier | Key size |
//! |------------|----------|
//! | `A128KW` | 128 bits |
//! | `A256KW` | 256 bits |
//! | `http://www.w3.org/2001/04/xmlenc#kw-aes128` | 128 bits (`xmlenc` feature) |
//! | `http://www.w3.org/2001/04/xmlenc#kw-aes256` | 256 bits (`xmlenc` feature) |
//!
//! Content encryption identifiers such as `A128GCM` are rejected even though
//! they name AES.
//!
//! # Features
//!
//! - `prelude` (default) - the [`prelude`] module
//! - `xmlenc` (default) - XML Encryption key wrap identifiers
//!
//! # Security
//!
//! - Key material is zeroized on drop
//! - Debug output redacts key material
//! - The integrity check is constant time
//! - A wrong key and a tampered blob fail with the same error
//! - No unsafe code

pub mod core;

#[cfg(feature = "prelude")]
pub mod prelude;

// Re-export commonly used items at crate root
pub use crate::core::error::{KeyWrapError, KeyWrapResult};
pub use crate::core::factory::{CryptoProviderFactory, CustomCryptoProvider};
pub use crate::core::key::{JsonWebKey, SecurityKey, SymmetricSecurityKey};
pub use crate::core::provider::{KeyWrapProvider, SymmetricKeyWrapProvider};

//! Core key wrap types and operations.
//!
//! - [`error`] - Error types for key wrap operations
//! - [`algorithm`] - Algorithm identifiers and the registry
//! - [`key`] - The [`SecurityKey`](key::SecurityKey) capability and key types
//! - [`operations`] - The RFC 3394 transform
//! - [`provider`] - Key wrap providers
//! - [`factory`] - Provider factory and custom provider hook

pub mod algorithm;
pub mod error;
pub mod factory;
pub mod key;
pub mod operations;
pub mod provider;

// Re-export commonly used items
pub use error::{KeyWrapError, KeyWrapResult};
pub use key::{JsonWebKey, SecurityKey, SymmetricSecurityKey};
pub use provider::{KeyWrapProvider, SymmetricKeyWrapProvider};

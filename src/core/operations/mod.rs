//! Cryptographic operations.
//!
//! - [`kw`] - AES Key Wrap (RFC 3394) over a single-block AES primitive

pub mod kw;

//! Integration tests for provider construction, the factory seam and
//! concurrent use.

#![allow(clippy::expect_used, clippy::panic, clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use keywrap::core::algorithm::{
    A128CBC_HS256, A128KW, A256CBC_HS512, A256GCM, A256KW, AES128_ENCRYPTION, AES256_ENCRYPTION,
};
#[cfg(feature = "xmlenc")]
use keywrap::core::algorithm::{AES128_KW, AES256_KW};
use keywrap::{
    CryptoProviderFactory, CustomCryptoProvider, JsonWebKey, KeyWrapError, KeyWrapProvider,
    KeyWrapResult, SecurityKey, SymmetricKeyWrapProvider, SymmetricSecurityKey,
};
use zeroize::Zeroizing;

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_constructor_matrix() {
    let key_128 = SymmetricSecurityKey::from([0x01u8; 16]);
    let key_256 = SymmetricSecurityKey::from([0x02u8; 32]);

    type Case<'a> = (&'a dyn SecurityKey, &'a str, Option<KeyWrapError>);
    let cases: [Case<'_>; 4] = [
        (&key_128, A128KW, None),
        (&key_256, A256KW, None),
        (
            &key_128,
            A256KW,
            Some(KeyWrapError::InvalidKeySize {
                expected: 256,
                actual: 128,
            }),
        ),
        (
            &key_256,
            A128KW,
            Some(KeyWrapError::InvalidKeySize {
                expected: 128,
                actual: 256,
            }),
        ),
    ];

    #[cfg_attr(not(feature = "xmlenc"), allow(unused_mut))]
    let mut cases = cases.to_vec();
    #[cfg(feature = "xmlenc")]
    {
        let xmlenc: [Case<'_>; 4] = [
            (&key_128, AES128_KW, None),
            (&key_256, AES256_KW, None),
            (
                &key_256,
                AES128_KW,
                Some(KeyWrapError::InvalidKeySize {
                    expected: 128,
                    actual: 256,
                }),
            ),
            (
                &key_128,
                AES256_KW,
                Some(KeyWrapError::InvalidKeySize {
                    expected: 256,
                    actual: 128,
                }),
            ),
        ];
        cases.extend(xmlenc);
    }

    for (key, alg, expected) in cases {
        match SymmetricKeyWrapProvider::new(key, alg) {
            Ok(provider) => {
                assert_eq!(expected, None, "{alg} should have failed");
                assert_eq!(provider.algorithm(), alg);
                assert_eq!(provider.context(), "");
                assert!(std::ptr::addr_eq(provider.key(), key));

                let wrapped = provider.wrap_key(&[0x5au8; 16]).expect("wrap");
                assert_eq!(wrapped.len(), 24, "{alg}");
                let unwrapped = provider.unwrap_key(&wrapped).expect("unwrap");
                assert_eq!(unwrapped.as_slice(), &[0x5au8; 16], "{alg}");
            }
            Err(err) => assert_eq!(Some(err), expected, "{alg}"),
        }
    }
}

#[test]
fn test_null_key_and_algorithm() {
    let result = SymmetricKeyWrapProvider::from_parts(None, None);
    assert_eq!(result.err(), Some(KeyWrapError::InvalidArgument("key")));
}

#[test]
fn test_plain_aes_algorithms_are_unsupported() {
    let key_128 = SymmetricSecurityKey::from([0x01u8; 16]);
    let key_256 = SymmetricSecurityKey::from([0x02u8; 32]);

    for (key, alg) in [
        (&key_128, AES128_ENCRYPTION),
        (&key_256, AES256_ENCRYPTION),
        (&key_256, A128CBC_HS256),
        (&key_256, A256CBC_HS512),
        (&key_256, A256GCM),
    ] {
        let result = SymmetricKeyWrapProvider::new(key, alg);
        assert_eq!(
            result.err(),
            Some(KeyWrapError::UnsupportedAlgorithm(alg.to_string())),
            "{alg}"
        );
    }
}

#[test]
fn test_rsa_jwk_is_invalid_key_type() {
    let jwk: JsonWebKey = serde_json::from_str(
        r#"{"kty":"RSA","kid":"rsa-1","n":"AQAB","e":"AQAB"}"#,
    )
    .expect("valid jwk");
    let result = SymmetricKeyWrapProvider::new(&jwk, A128KW);
    assert_eq!(result.err(), Some(KeyWrapError::InvalidKeyType));
}

#[test]
fn test_oct_jwk_matches_raw_key() -> KeyWrapResult<()> {
    let raw = SymmetricSecurityKey::from([0x07u8; 32]);
    let jwk: JsonWebKey = serde_json::from_str(
        r#"{"kty":"oct","kid":"oct-1","k":"BwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwcHBwc"}"#,
    )
    .expect("valid jwk");
    assert_eq!(jwk.key_size(), 256);

    let from_raw = SymmetricKeyWrapProvider::new(&raw, A256KW)?;
    let from_jwk = SymmetricKeyWrapProvider::new(&jwk, A256KW)?;
    let plaintext = [0x33u8; 24];
    assert_eq!(from_raw.wrap_key(&plaintext)?, from_jwk.wrap_key(&plaintext)?);
    assert_eq!(from_jwk.key().key_id(), Some("oct-1"));
    Ok(())
}

#[cfg(feature = "xmlenc")]
#[test]
fn test_xmlenc_identifiers_match_jose_output() -> KeyWrapResult<()> {
    let key_128 = SymmetricSecurityKey::from([0x01u8; 16]);
    let key_256 = SymmetricSecurityKey::from([0x02u8; 32]);
    let plaintext = [0x77u8; 32];

    for (key, jose, xmlenc) in [(&key_128, A128KW, AES128_KW), (&key_256, A256KW, AES256_KW)] {
        let jose = SymmetricKeyWrapProvider::new(key, jose)?;
        let xmlenc = SymmetricKeyWrapProvider::new(key, xmlenc)?;
        let wrapped = xmlenc.wrap_key(&plaintext)?;
        assert_eq!(wrapped, jose.wrap_key(&plaintext)?);
        assert_eq!(jose.unwrap_key(&wrapped)?.as_slice(), &plaintext);
    }
    Ok(())
}

// =============================================================================
// Wrap / unwrap
// =============================================================================

#[test]
fn test_zero_key_guid_roundtrip() -> KeyWrapResult<()> {
    let key = SymmetricSecurityKey::from([0u8; 16]);
    let provider = SymmetricKeyWrapProvider::new(&key, A128KW)?;

    // 6ba7b810-9dad-11d1-80b4-00c04fd430c8
    let guid: [u8; 16] = [
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ];
    let wrapped = provider.wrap_key(&guid)?;
    assert_eq!(wrapped.len(), 24);
    assert_eq!(provider.unwrap_key(&wrapped)?.as_slice(), &guid);
    Ok(())
}

#[test]
fn test_wrap_nine_bytes_fails() -> KeyWrapResult<()> {
    let key = SymmetricSecurityKey::from([0u8; 16]);
    let provider = SymmetricKeyWrapProvider::new(&key, A128KW)?;
    assert_eq!(
        provider.wrap_key(&[0u8; 9]).err(),
        Some(KeyWrapError::InvalidInputLength(9))
    );
    assert_eq!(
        provider.wrap_key(&[]).err(),
        Some(KeyWrapError::InvalidArgument("key_bytes"))
    );
    Ok(())
}

#[test]
fn test_unwrap_twelve_bytes_fails() -> KeyWrapResult<()> {
    let key = SymmetricSecurityKey::from([0u8; 32]);
    let provider = SymmetricKeyWrapProvider::new(&key, A256KW)?;
    assert_eq!(
        provider.unwrap_key(&[0u8; 12]).err(),
        Some(KeyWrapError::InvalidInputLength(12))
    );
    assert_eq!(
        provider.unwrap_key(&[]).err(),
        Some(KeyWrapError::InvalidArgument("wrapped_key"))
    );
    Ok(())
}

#[test]
fn test_wrong_key_and_tampering_are_indistinguishable() -> KeyWrapResult<()> {
    let key = SymmetricSecurityKey::from([0x10u8; 16]);
    let other = SymmetricSecurityKey::from([0x11u8; 16]);
    let provider = SymmetricKeyWrapProvider::new(&key, A128KW)?;
    let other_provider = SymmetricKeyWrapProvider::new(&other, A128KW)?;

    let wrapped = provider.wrap_key(&[0x44u8; 16])?;
    let wrong_key = other_provider.unwrap_key(&wrapped).err();

    let mut tampered = wrapped.clone();
    tampered[12] ^= 0x80;
    let tampered = provider.unwrap_key(&tampered).err();

    assert_eq!(wrong_key, Some(KeyWrapError::IntegrityCheckFailed));
    assert_eq!(wrong_key, tampered);
    Ok(())
}

#[test]
fn test_concurrent_use() -> KeyWrapResult<()> {
    let key = SymmetricSecurityKey::from([0x55u8; 32]);
    let provider = SymmetricKeyWrapProvider::new(&key, A256KW)?;
    let expected = provider.wrap_key(&[0x66u8; 32])?;

    thread::scope(|scope| {
        for worker in 0..8u8 {
            let provider = &provider;
            let expected = &expected;
            scope.spawn(move || {
                for _ in 0..64 {
                    assert_eq!(&provider.wrap_key(&[0x66u8; 32]).unwrap(), expected);
                    let plaintext = [worker; 16];
                    let wrapped = provider.wrap_key(&plaintext).unwrap();
                    assert_eq!(provider.unwrap_key(&wrapped).unwrap().as_slice(), &plaintext);
                }
            });
        }
    });
    Ok(())
}

// =============================================================================
// Factory and custom providers
// =============================================================================

/// Counts calls and delegates to the built-in provider.
struct CountingProvider<'k> {
    inner: SymmetricKeyWrapProvider<'k>,
    calls: Arc<AtomicUsize>,
}

impl KeyWrapProvider for CountingProvider<'_> {
    fn algorithm(&self) -> &str {
        self.inner.algorithm()
    }

    fn key(&self) -> &dyn SecurityKey {
        self.inner.key()
    }

    fn context(&self) -> &str {
        self.inner.context()
    }

    fn wrap_key(&self, key_bytes: &[u8]) -> KeyWrapResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.wrap_key(key_bytes)
    }

    fn unwrap_key(&self, wrapped_key: &[u8]) -> KeyWrapResult<Zeroizing<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.unwrap_key(wrapped_key)
    }
}

struct CountingCryptoProvider {
    calls: Arc<AtomicUsize>,
}

impl CustomCryptoProvider for CountingCryptoProvider {
    fn is_supported_algorithm(&self, algorithm: &str) -> bool {
        algorithm == A128KW
    }

    fn create<'k>(
        &self,
        key: &'k dyn SecurityKey,
        algorithm: &str,
    ) -> KeyWrapResult<Box<dyn KeyWrapProvider + 'k>> {
        Ok(Box::new(CountingProvider {
            inner: SymmetricKeyWrapProvider::new(key, algorithm)?.with_context("counting"),
            calls: Arc::clone(&self.calls),
        }))
    }
}

#[test]
fn test_custom_provider_intercepts_calls() -> KeyWrapResult<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let factory = CryptoProviderFactory::new().with_custom_provider(Arc::new(
        CountingCryptoProvider {
            calls: Arc::clone(&calls),
        },
    ));

    let key = SymmetricSecurityKey::from([0x21u8; 16]);
    let provider = factory.create_key_wrap_provider(&key, A128KW)?;
    assert_eq!(provider.context(), "counting");

    let wrapped = provider.wrap_key(&[0x22u8; 16])?;
    assert_eq!(provider.unwrap_key(&wrapped)?.as_slice(), &[0x22u8; 16]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    // The intercepted provider keeps the built-in output format.
    let plain = SymmetricKeyWrapProvider::new(&key, A128KW)?;
    assert_eq!(plain.wrap_key(&[0x22u8; 16])?, wrapped);
    Ok(())
}

#[test]
fn test_custom_provider_falls_through_for_other_algorithms() -> KeyWrapResult<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let factory = CryptoProviderFactory::new().with_custom_provider(Arc::new(
        CountingCryptoProvider {
            calls: Arc::clone(&calls),
        },
    ));

    let key = SymmetricSecurityKey::from([0x21u8; 32]);
    let provider = factory.create_key_wrap_provider(&key, A256KW)?;
    assert_eq!(provider.context(), "");
    provider.wrap_key(&[0x22u8; 16])?;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    Ok(())
}

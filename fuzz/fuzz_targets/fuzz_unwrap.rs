#![no_main]

use libfuzzer_sys::fuzz_target;
use keywrap::core::algorithm::{A128KW, A256KW};
use keywrap::{KeyWrapProvider, SymmetricKeyWrapProvider, SymmetricSecurityKey};

fuzz_target!(|data: &[u8]| {
    let key_128 = SymmetricSecurityKey::from([0x0fu8; 16]);
    let key_256 = SymmetricSecurityKey::from([0xf0u8; 32]);

    for (key, alg) in [(&key_128, A128KW), (&key_256, A256KW)] {
        let Ok(provider) = SymmetricKeyWrapProvider::new(key, alg) else {
            return;
        };

        // Arbitrary blobs must be rejected, never panic
        let _ = provider.unwrap_key(data);

        // Block-aligned input must survive a roundtrip
        if let Ok(wrapped) = provider.wrap_key(data) {
            let unwrapped = provider.unwrap_key(&wrapped);
            assert_eq!(unwrapped.as_deref().map(Vec::as_slice), Ok(data));
        }
    }
});

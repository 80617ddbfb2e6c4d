//! AES Key Wrap (RFC 3394).
//!
//! The only primitive used is a single-block AES encryption/decryption. The
//! six rounds of 64-bit chaining, the integrity register and the step
//! counter are implemented here on top of it.
//!
//! Wrapped output is `A || R[1] || ... || R[n]`, one 64-bit block longer
//! than the input.

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes256, Block};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::core::algorithm::AesVariant;
use crate::core::error::{KeyWrapError, KeyWrapResult};

/// Semiblock size (64 bits).
pub const SEMIBLOCK_SIZE: usize = 8;

/// Smallest accepted wrapped input: integrity block plus one key block.
pub const MIN_WRAPPED_SIZE: usize = 2 * SEMIBLOCK_SIZE;

/// Default initial value, RFC 3394 section 2.2.3.1.
pub const DEFAULT_IV: [u8; SEMIBLOCK_SIZE] = [0xa6; SEMIBLOCK_SIZE];

const ROUNDS: u64 = 6;

/// A key encryption key bound to its AES variant.
///
/// The AES key schedule lives only as long as this value; providers build
/// one per call.
pub enum Kek {
    /// AES-128 key schedule.
    Aes128(Aes128),
    /// AES-256 key schedule.
    Aes256(Aes256),
}

impl Kek {
    /// Expands `key` for the given AES variant.
    ///
    /// # Errors
    ///
    /// Returns [`KeyWrapError::InvalidKeySize`] if `key` does not have the
    /// variant's key length.
    pub fn new(cipher: AesVariant, key: &[u8]) -> KeyWrapResult<Self> {
        let invalid_size = |_| KeyWrapError::InvalidKeySize {
            expected: cipher.key_len() * 8,
            actual: key.len() * 8,
        };
        match cipher {
            AesVariant::Aes128 => Aes128::new_from_slice(key)
                .map(Self::Aes128)
                .map_err(invalid_size),
            AesVariant::Aes256 => Aes256::new_from_slice(key)
                .map(Self::Aes256)
                .map_err(invalid_size),
        }
    }

    fn encrypt_block(&self, block: &mut Block) {
        match self {
            Self::Aes128(cipher) => cipher.encrypt_block(block),
            Self::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut Block) {
        match self {
            Self::Aes128(cipher) => cipher.decrypt_block(block),
            Self::Aes256(cipher) => cipher.decrypt_block(block),
        }
    }
}

/// Wraps `plaintext` under `kek`.
///
/// # Errors
///
/// - [`KeyWrapError::InvalidArgument`] if `plaintext` is empty
/// - [`KeyWrapError::InvalidInputLength`] if its length is not a multiple of 8
pub fn wrap(kek: &Kek, plaintext: &[u8]) -> KeyWrapResult<Vec<u8>> {
    if plaintext.is_empty() {
        return Err(KeyWrapError::InvalidArgument("key_bytes"));
    }
    if plaintext.len() % SEMIBLOCK_SIZE != 0 {
        return Err(KeyWrapError::InvalidInputLength(plaintext.len()));
    }

    let n = (plaintext.len() / SEMIBLOCK_SIZE) as u64;
    let mut output = vec![0u8; plaintext.len() + SEMIBLOCK_SIZE];
    output[..SEMIBLOCK_SIZE].copy_from_slice(&DEFAULT_IV);
    output[SEMIBLOCK_SIZE..].copy_from_slice(plaintext);

    let (a, r) = output.split_at_mut(SEMIBLOCK_SIZE);
    let mut block = Block::default();
    for j in 0..ROUNDS {
        for (i, r_i) in (1..=n).zip(r.chunks_exact_mut(SEMIBLOCK_SIZE)) {
            // B = AES(K, A | R[i])
            block[..SEMIBLOCK_SIZE].copy_from_slice(a);
            block[SEMIBLOCK_SIZE..].copy_from_slice(r_i);
            kek.encrypt_block(&mut block);

            // A = MSB(64, B) ^ t, R[i] = LSB(64, B)
            let t = (n * j + i).to_be_bytes();
            for (dst, (b, t)) in a.iter_mut().zip(block[..SEMIBLOCK_SIZE].iter().zip(t)) {
                *dst = b ^ t;
            }
            r_i.copy_from_slice(&block[SEMIBLOCK_SIZE..]);
        }
    }
    block.as_mut_slice().zeroize();

    Ok(output)
}

/// Unwraps `wrapped` under `kek` and checks the integrity register.
///
/// # Errors
///
/// - [`KeyWrapError::InvalidArgument`] if `wrapped` is empty
/// - [`KeyWrapError::InvalidInputLength`] if its length is not a multiple of
///   8 or is below 16 bytes
/// - [`KeyWrapError::IntegrityCheckFailed`] if the recovered register does not
///   match the initial value
pub fn unwrap(kek: &Kek, wrapped: &[u8]) -> KeyWrapResult<Zeroizing<Vec<u8>>> {
    if wrapped.is_empty() {
        return Err(KeyWrapError::InvalidArgument("wrapped_key"));
    }
    if wrapped.len() % SEMIBLOCK_SIZE != 0 || wrapped.len() < MIN_WRAPPED_SIZE {
        return Err(KeyWrapError::InvalidInputLength(wrapped.len()));
    }

    let n = (wrapped.len() / SEMIBLOCK_SIZE - 1) as u64;
    let mut a = [0u8; SEMIBLOCK_SIZE];
    a.copy_from_slice(&wrapped[..SEMIBLOCK_SIZE]);
    let mut r = Zeroizing::new(wrapped[SEMIBLOCK_SIZE..].to_vec());

    let mut block = Block::default();
    for j in (0..ROUNDS).rev() {
        let blocks = r.chunks_exact_mut(SEMIBLOCK_SIZE).rev();
        for (i, r_i) in (1..=n).rev().zip(blocks) {
            // B = AES-1(K, (A ^ t) | R[i])
            let t = (n * j + i).to_be_bytes();
            for (dst, (x, t)) in block[..SEMIBLOCK_SIZE].iter_mut().zip(a.iter().zip(t)) {
                *dst = x ^ t;
            }
            block[SEMIBLOCK_SIZE..].copy_from_slice(r_i);
            kek.decrypt_block(&mut block);

            // A = MSB(64, B), R[i] = LSB(64, B)
            a.copy_from_slice(&block[..SEMIBLOCK_SIZE]);
            r_i.copy_from_slice(&block[SEMIBLOCK_SIZE..]);
        }
    }
    block.as_mut_slice().zeroize();

    if a[..].ct_eq(&DEFAULT_IV[..]).into() {
        Ok(r)
    } else {
        Err(KeyWrapError::IntegrityCheckFailed)
    }
}

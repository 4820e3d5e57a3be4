//! AES-256-CFB encryption and decryption of raw byte payloads.
//!
//! **Confidentiality only.** CFB is a stream mode with no authentication tag:
//! a tampered envelope decrypts to garbage rather than failing. Callers that
//! need tamper detection must not use this module.

use aes::cipher::{AsyncStreamCipher, KeyIvInit};
use common::ChaincodeError;
use rand::{rngs::OsRng, TryRngCore};
use thiserror::Error;
use zeroize::Zeroizing;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of the CFB initialisation vector (one AES block).
pub const IV_LEN: usize = 16;

type Aes256CfbEnc = cfb_mode::Encryptor<aes::Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<aes::Aes256>;

/// Errors produced by the cipher layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The key is the wrong length (must be [`KEY_LEN`] bytes).
    #[error("invalid key length: expected {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The envelope is shorter than its IV.
    #[error("ciphertext too short: expected at least {IV_LEN} bytes, got {0}")]
    TooShort(usize),

    /// The random source failed to produce bytes.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

impl From<CipherError> for ChaincodeError {
    fn from(e: CipherError) -> Self {
        match e {
            CipherError::InvalidKeyLength(got) => ChaincodeError::InvalidKeyLength {
                expected: KEY_LEN,
                got,
            },
            CipherError::TooShort(len) => ChaincodeError::TooShort(len),
            CipherError::EntropyUnavailable(reason) => ChaincodeError::EntropyUnavailable(reason),
        }
    }
}

/// Ephemeral AES-256 key, owned by a single encrypt/decrypt pair.
///
/// The buffer is zeroized on drop.
pub struct SymmetricKey(Zeroizing<[u8; KEY_LEN]>);

impl SymmetricKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// `IV || ciphertext`, exactly `IV_LEN + plaintext.len()` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherEnvelope(Vec<u8>);

impl CipherEnvelope {
    pub fn iv(&self) -> &[u8] {
        &self.0[..IV_LEN]
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.0[IV_LEN..]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: an envelope holds at least its IV.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Draw a fresh [`KEY_LEN`]-byte key from the OS CSPRNG.
///
/// # Errors
///
/// Returns [`CipherError::EntropyUnavailable`] if the OS cannot supply bytes.
/// There is no fallback to a weaker generator.
pub fn generate_key() -> Result<SymmetricKey, CipherError> {
    generate_key_from(&mut OsRng)
}

/// Draw a key from an arbitrary fallible random source.
pub fn generate_key_from<R: TryRngCore>(rng: &mut R) -> Result<SymmetricKey, CipherError> {
    let mut buf = Zeroizing::new([0u8; KEY_LEN]);
    rng.try_fill_bytes(&mut buf[..])
        .map_err(|e| CipherError::EntropyUnavailable(e.to_string()))?;
    Ok(SymmetricKey(buf))
}

/// Encrypt `plaintext` under `key` with a fresh random IV from the OS CSPRNG.
///
/// Two calls with identical inputs produce different envelopes.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes,
/// or [`CipherError::EntropyUnavailable`] if no IV could be drawn.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<CipherEnvelope, CipherError> {
    encrypt_with(&mut OsRng, key, plaintext)
}

/// Encrypt with the IV drawn from `rng`.
pub fn encrypt_with<R: TryRngCore>(
    rng: &mut R,
    key: &[u8],
    plaintext: &[u8],
) -> Result<CipherEnvelope, CipherError> {
    ensure_key_len(key)?;

    let mut envelope = vec![0u8; IV_LEN + plaintext.len()];
    let (iv, body) = envelope.split_at_mut(IV_LEN);
    rng.try_fill_bytes(iv)
        .map_err(|e| CipherError::EntropyUnavailable(e.to_string()))?;
    body.copy_from_slice(plaintext);

    Aes256CfbEnc::new_from_slices(key, iv)
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
        .encrypt(body);

    Ok(CipherEnvelope(envelope))
}

/// Split `envelope` into IV and ciphertext and recover the plaintext.
///
/// The key length is checked before the envelope length.
///
/// # Errors
///
/// Returns [`CipherError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes,
/// or [`CipherError::TooShort`] if `envelope` is shorter than [`IV_LEN`].
pub fn decrypt(key: &[u8], envelope: &[u8]) -> Result<Vec<u8>, CipherError> {
    ensure_key_len(key)?;
    if envelope.len() < IV_LEN {
        return Err(CipherError::TooShort(envelope.len()));
    }

    let (iv, ciphertext) = envelope.split_at(IV_LEN);
    let mut plaintext = ciphertext.to_vec();
    Aes256CfbDec::new_from_slices(key, iv)
        .map_err(|_| CipherError::InvalidKeyLength(key.len()))?
        .decrypt(&mut plaintext);

    Ok(plaintext)
}

/// Encrypt then decrypt `plaintext` under a throwaway key.
///
/// The result is byte-identical to the input; the point is the work done.
pub fn round_trip(plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
    round_trip_with(&mut OsRng, plaintext)
}

/// [`round_trip`] with the key and IV drawn from `rng`.
pub fn round_trip_with<R: TryRngCore>(
    rng: &mut R,
    plaintext: &[u8],
) -> Result<Vec<u8>, CipherError> {
    let key = generate_key_from(rng)?;
    let envelope = encrypt_with(rng, key.as_bytes(), plaintext)?;
    decrypt(key.as_bytes(), envelope.as_bytes())
}

fn ensure_key_len(key: &[u8]) -> Result<(), CipherError> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength(key.len()));
    }
    Ok(())
}

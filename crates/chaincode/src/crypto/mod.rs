//! AES-256-CFB primitives used for the put-path load step.
//!
//! This module has no ledger or host dependencies. It only consumes entropy.
//!
//! # Envelope format
//!
//! ```text
//! IV (16 bytes) || ciphertext (len(plaintext) bytes)
//! ```

pub mod cipher;

pub use cipher::{CipherEnvelope, CipherError, SymmetricKey, IV_LEN, KEY_LEN};

#[cfg(test)]
pub(crate) mod test_rng;

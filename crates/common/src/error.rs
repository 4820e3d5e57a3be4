//! Common error types shared across crates.

use thiserror::Error;

/// Peer response status for a successful transaction.
pub const STATUS_OK: u16 = 200;

/// Peer response status for a request the caller got wrong.
pub const STATUS_BAD_REQUEST: u16 = 400;

/// Peer response status for a failure inside the chaincode or its store.
pub const STATUS_ERROR: u16 = 500;

/// Every way a single chaincode invocation can fail.
///
/// All variants are terminal for the invocation that produced them. Variants
/// map to peer response statuses:
/// - caller mistakes ([`ChaincodeError::UnknownEntryPoint`],
///   [`ChaincodeError::InvalidArgumentCount`], [`ChaincodeError::UnknownMethod`],
///   [`ChaincodeError::KeyNotFound`], [`ChaincodeError::BadRequest`]) → 400
/// - store and cipher failures → 500
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChaincodeError {
    /// The host called a function other than the fixed invocation tag.
    #[error("unknown function call: {0}")]
    UnknownEntryPoint(String),

    /// Too few (or, for `put`, too many) arguments.
    #[error("invalid number of args for {scope}: {got}")]
    InvalidArgumentCount { scope: String, got: usize },

    /// `args[0]` named neither `put` nor `get`.
    #[error("unknown function {0}")]
    UnknownMethod(String),

    /// The state store refused or failed a write.
    #[error("failed to write state for key {key}: {reason}")]
    StoreWriteFailed { key: String, reason: String },

    /// The state store failed a read.
    #[error("failed to read state for key {key}: {reason}")]
    StoreReadFailed { key: String, reason: String },

    /// The key has no value in the store.
    #[error("{{\"Error\":\"No value available for the key {0}\"}}")]
    KeyNotFound(String),

    /// A symmetric key had the wrong length for AES-256.
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// A cipher envelope was shorter than its IV.
    #[error("ciphertext too short: {0} bytes")]
    TooShort(usize),

    /// The OS random source could not supply bytes.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),

    /// The host could not parse the request at all.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ChaincodeError {
    /// Returns the peer response status that should be sent for this error.
    pub fn status(&self) -> u16 {
        match self {
            ChaincodeError::UnknownEntryPoint(_)
            | ChaincodeError::InvalidArgumentCount { .. }
            | ChaincodeError::UnknownMethod(_)
            | ChaincodeError::KeyNotFound(_)
            | ChaincodeError::BadRequest(_) => STATUS_BAD_REQUEST,
            ChaincodeError::StoreWriteFailed { .. }
            | ChaincodeError::StoreReadFailed { .. }
            | ChaincodeError::InvalidKeyLength { .. }
            | ChaincodeError::TooShort(_)
            | ChaincodeError::EntropyUnavailable(_) => STATUS_ERROR,
        }
    }

    /// Short machine-readable error code (e.g. `"key_not_found"`).
    pub fn code(&self) -> &'static str {
        match self {
            ChaincodeError::UnknownEntryPoint(_) => "unknown_entry_point",
            ChaincodeError::InvalidArgumentCount { .. } => "invalid_argument_count",
            ChaincodeError::UnknownMethod(_) => "unknown_method",
            ChaincodeError::StoreWriteFailed { .. } => "store_write_failed",
            ChaincodeError::StoreReadFailed { .. } => "store_read_failed",
            ChaincodeError::KeyNotFound(_) => "key_not_found",
            ChaincodeError::InvalidKeyLength { .. } => "invalid_key_length",
            ChaincodeError::TooShort(_) => "too_short",
            ChaincodeError::EntropyUnavailable(_) => "entropy_unavailable",
            ChaincodeError::BadRequest(_) => "bad_request",
        }
    }
}

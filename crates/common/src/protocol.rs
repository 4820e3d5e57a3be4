//! Request and response types exchanged between the host and the chaincode.
//!
//! Both are serialised as newline-delimited JSON by the development host.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{ChaincodeError, STATUS_OK};

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// Lifecycle step a request targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// One-time instantiation of the chaincode.
    Init,
    /// A regular transaction.
    #[default]
    Invoke,
}

/// A single transaction handed to the chaincode by its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Lifecycle step; defaults to [`Phase::Invoke`].
    #[serde(default)]
    pub phase: Phase,
    /// Function name; must equal the invocation tag for [`Phase::Invoke`].
    pub function: String,
    /// Ordered string arguments; `args[0]` selects the method.
    #[serde(default)]
    pub args: Vec<String>,
    /// Host-assigned transaction id, used only for log correlation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
}

impl InvocationRequest {
    /// Build an invoke request from a function name and its parameters.
    pub fn invoke(function: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            phase: Phase::Invoke,
            function: function.into(),
            args,
            tx_id: None,
        }
    }

    /// Split a flat argument list into function and parameters.
    ///
    /// The first element is the function name; an empty list yields an empty
    /// function name and no parameters.
    pub fn from_raw_args(raw: Vec<String>) -> Self {
        let mut iter = raw.into_iter();
        let function = iter.next().unwrap_or_default();
        Self::invoke(function, iter.collect())
    }

    /// Attach a transaction id.
    pub fn with_tx_id(mut self, tx_id: impl Into<String>) -> Self {
        self.tx_id = Some(tx_id.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Outcome of one invocation, shaped like a peer response.
///
/// `status` is 200 on success and at least 400 on failure. Payload bytes are
/// carried as standard base64 in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, with = "payload_base64", skip_serializing_if = "Option::is_none")]
    pub payload: Option<Bytes>,
}

impl Response {
    /// A successful response carrying `payload`.
    pub fn success(payload: impl Into<Bytes>) -> Self {
        Self {
            status: STATUS_OK,
            message: String::new(),
            payload: Some(payload.into()),
        }
    }

    /// A successful response with no payload.
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK,
            message: String::new(),
            payload: None,
        }
    }

    /// A failed response describing `err`.
    pub fn error(err: &ChaincodeError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
            payload: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

mod payload_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Bytes>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(b) => s.serialize_some(&STANDARD.encode(b)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Bytes>, D::Error> {
        let encoded: Option<String> = Option::deserialize(d)?;
        encoded
            .map(|s| {
                STANDARD
                    .decode(s)
                    .map(Bytes::from)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

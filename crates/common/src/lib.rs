//! Common types, protocol definitions, and errors shared across the chaincode crates.

pub mod error;
pub mod protocol;

pub use error::ChaincodeError;
pub use protocol::{InvocationRequest, Phase, Response};

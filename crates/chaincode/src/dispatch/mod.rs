//! Transaction dispatch: entry-point check, arity validation, and routing.
//!
//! # Invocation contract
//!
//! ```text
//! invoke put <key> <value> [enable]   -> "OK"
//! invoke get <key>                    -> stored bytes
//! ```
//!
//! Every path ends in a success payload or exactly one
//! [`ChaincodeError`](common::ChaincodeError). Nothing is retried and nothing
//! is partially applied.

pub mod handlers;
pub mod router;
pub mod settings;

pub use router::{Dispatcher, METHOD_GET, METHOD_PUT};
pub use settings::DispatchSettings;

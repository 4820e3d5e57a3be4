//! Key-per-invoke chaincode.
//!
//! Two transactions against a host-supplied ledger state store:
//! `put` (optionally running the value through an AES-256-CFB round trip under
//! a fresh key, purely as extra work) and `get`.
//!
//! - [`crypto`]: key generation and the `IV || ciphertext` envelope.
//! - [`ledger`]: the [`StateStore`](ledger::StateStore) collaborator.
//! - [`dispatch`]: the [`Dispatcher`](dispatch::Dispatcher) entry point.
//! - [`host`]: a line-oriented development host.

pub mod config;
pub mod crypto;
pub mod dispatch;
pub mod host;
pub mod ledger;
pub mod telemetry;

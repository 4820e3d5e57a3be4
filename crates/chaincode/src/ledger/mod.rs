//! Ledger state access.
//!
//! The chaincode never owns persistence. The host supplies a [`StateStore`]
//! when the [`Dispatcher`](crate::dispatch::Dispatcher) is built; ledger commit,
//! ordering and replay all happen outside this crate.

pub mod store;

pub use store::{LedgerError, MemoryLedger, StateStore};

#[cfg(test)]
pub use store::MockStateStore;

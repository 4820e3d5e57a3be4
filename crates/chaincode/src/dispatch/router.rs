//! [`Dispatcher`]: the chaincode's single entry point.

use bytes::Bytes;
use common::{ChaincodeError, InvocationRequest, Phase, Response};
use rand::{rngs::OsRng, TryRngCore};
use tracing::{info, warn};

use super::{handlers, settings::DispatchSettings};
use crate::ledger::StateStore;

/// Method name routed to [`handlers::write_transaction`].
pub const METHOD_PUT: &str = "put";

/// Method name routed to [`handlers::read_transaction`].
pub const METHOD_GET: &str = "get";

/// Routes invocations to the read or write handler against one state store.
///
/// Holds no per-invocation state; each call runs to completion on the
/// caller's thread. `E` is the entropy source for the `put` load step; each
/// invocation draws from its own copy.
#[derive(Clone, Debug)]
pub struct Dispatcher<S, E = OsRng> {
    store: S,
    settings: DispatchSettings,
    entropy: E,
}

impl<S: StateStore> Dispatcher<S> {
    /// Build a dispatcher drawing keys and IVs from the OS CSPRNG.
    pub fn new(store: S, settings: DispatchSettings) -> Self {
        Self::with_entropy(store, settings, OsRng)
    }
}

impl<S: StateStore, E: TryRngCore + Clone> Dispatcher<S, E> {
    pub fn with_entropy(store: S, settings: DispatchSettings, entropy: E) -> Self {
        Self {
            store,
            settings,
            entropy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Instantiate the chaincode. Nothing to set up; always succeeds.
    pub fn init(&self, args: &[String]) -> Response {
        info!(args = args.len(), "chaincode instantiated");
        Response::ok()
    }

    /// Validate and route one transaction.
    ///
    /// `operation` must equal the configured invocation tag; `args[0]` selects
    /// `put` or `get`.
    ///
    /// # Errors
    ///
    /// - [`ChaincodeError::UnknownEntryPoint`] if `operation` is not the tag.
    /// - [`ChaincodeError::InvalidArgumentCount`] with fewer than 2 args.
    /// - [`ChaincodeError::UnknownMethod`] for any method but `put`/`get`.
    /// - Any error from the routed handler.
    pub fn dispatch(&self, operation: &str, args: &[String]) -> Result<Bytes, ChaincodeError> {
        if operation != &*self.settings.invoke_function {
            return Err(ChaincodeError::UnknownEntryPoint(operation.to_owned()));
        }
        if args.len() < 2 {
            return Err(ChaincodeError::InvalidArgumentCount {
                scope: operation.to_owned(),
                got: args.len(),
            });
        }

        match args[0].as_str() {
            METHOD_PUT => handlers::write_transaction(
                &self.store,
                &mut self.entropy.clone(),
                args,
                &self.settings.encryption_flag,
            ),
            METHOD_GET => handlers::read_transaction(&self.store, args),
            other => Err(ChaincodeError::UnknownMethod(other.to_owned())),
        }
    }

    /// Handle a host request end to end and shape the result as a [`Response`].
    pub fn handle(&self, req: &InvocationRequest) -> Response {
        let tx_id = req.tx_id.as_deref().unwrap_or("-");
        match req.phase {
            Phase::Init => self.init(&req.args),
            Phase::Invoke => {
                let method = req.args.first().map(String::as_str).unwrap_or("");
                match self.dispatch(&req.function, &req.args) {
                    Ok(payload) => {
                        info!(tx_id, method, status = 200, "transaction complete");
                        Response::success(payload)
                    }
                    Err(e) => {
                        warn!(tx_id, method, status = e.status(), code = e.code(), error = %e, "transaction failed");
                        Response::error(&e)
                    }
                }
            }
        }
    }
}

//! Literal tags the dispatcher matches against.

use std::sync::Arc;

/// Default function name the host must call for regular transactions.
pub const DEFAULT_INVOKE_FUNCTION: &str = "invoke";

/// Default fourth `put` argument that turns on the encrypt/decrypt load step.
pub const DEFAULT_ENCRYPTION_FLAG: &str = "enable";

/// Settings shared by every invocation handled by a
/// [`Dispatcher`](super::Dispatcher).
///
/// Cheap to clone; both strings are `Arc`-backed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Function name that selects the transaction entry point.
    pub invoke_function: Arc<str>,
    /// Literal that, as the fourth `put` argument, enables the load step.
    pub encryption_flag: Arc<str>,
}

impl DispatchSettings {
    pub fn new(invoke_function: impl Into<Arc<str>>, encryption_flag: impl Into<Arc<str>>) -> Self {
        Self {
            invoke_function: invoke_function.into(),
            encryption_flag: encryption_flag.into(),
        }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self::new(DEFAULT_INVOKE_FUNCTION, DEFAULT_ENCRYPTION_FLAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = DispatchSettings::default();
        assert_eq!(&*s.invoke_function, "invoke");
        assert_eq!(&*s.encryption_flag, "enable");
    }
}

//! Read and write transaction handlers.
//!
//! Both take the already-routed argument list (`args[0]` is the method).

use bytes::Bytes;
use common::ChaincodeError;
use rand::TryRngCore;
use tracing::{debug, warn};

use crate::crypto::cipher;
use crate::ledger::StateStore;

/// Acknowledgement payload returned by a successful `put`.
pub const ACK: &[u8] = b"OK";

/// `put key value [flag]` — store `value` under `key`.
///
/// When `flag` equals `encryption_flag`, the value is run through an
/// encrypt/decrypt round trip under a fresh key drawn from `entropy` before it
/// is stored. The stored bytes are identical either way. The store is not
/// touched if that step fails.
///
/// # Errors
///
/// - [`ChaincodeError::InvalidArgumentCount`] unless there are 3 or 4 args.
/// - Cipher failures from the load step, as their typed variants.
/// - [`ChaincodeError::StoreWriteFailed`] if the store rejects the write.
pub fn write_transaction<S: StateStore + ?Sized, E: TryRngCore>(
    store: &S,
    entropy: &mut E,
    args: &[String],
    encryption_flag: &str,
) -> Result<Bytes, ChaincodeError> {
    let (key, value, flag) = match args {
        [_, key, value] => (key, value, None),
        [_, key, value, flag] => (key, value, Some(flag.as_str())),
        _ => {
            return Err(ChaincodeError::InvalidArgumentCount {
                scope: "put".into(),
                got: args.len(),
            })
        }
    };

    let encrypt = flag == Some(encryption_flag);
    let stored = if encrypt {
        let bytes = cipher::round_trip_with(entropy, value.as_bytes()).map_err(|e| {
            warn!(key = %key, argument = "value", error = %e, "encrypt/decrypt step failed");
            ChaincodeError::from(e)
        })?;
        Bytes::from(bytes)
    } else {
        Bytes::copy_from_slice(value.as_bytes())
    };

    let len = stored.len();
    store
        .put_state(key, stored)
        .map_err(|e| ChaincodeError::StoreWriteFailed {
            key: key.clone(),
            reason: e.to_string(),
        })?;

    debug!(key = %key, len, encrypt, "state written");
    Ok(Bytes::from_static(ACK))
}

/// `get key` — return the raw bytes stored under `key`.
///
/// Arguments after the key are ignored.
///
/// # Errors
///
/// - [`ChaincodeError::InvalidArgumentCount`] if no key is given.
/// - [`ChaincodeError::StoreReadFailed`] if the store fails.
/// - [`ChaincodeError::KeyNotFound`] if nothing is stored under `key`.
pub fn read_transaction<S: StateStore + ?Sized>(
    store: &S,
    args: &[String],
) -> Result<Bytes, ChaincodeError> {
    let key = args.get(1).ok_or_else(|| ChaincodeError::InvalidArgumentCount {
        scope: "get".into(),
        got: args.len(),
    })?;

    let value = store
        .get_state(key)
        .map_err(|e| ChaincodeError::StoreReadFailed {
            key: key.clone(),
            reason: e.to_string(),
        })?
        .ok_or_else(|| ChaincodeError::KeyNotFound(key.clone()))?;

    debug!(key = %key, len = value.len(), "state read");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::test_rng::Drained;
    use crate::ledger::{LedgerError, MemoryLedger, MockStateStore};
    use mockall::predicate::eq;
    use rand::rngs::OsRng;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn put_stores_plain_value() {
        let ledger = MemoryLedger::new();
        let ack =
            write_transaction(&ledger, &mut OsRng, &args(&["put", "k", "v"]), "enable").unwrap();
        assert_eq!(&ack[..], ACK);
        assert_eq!(ledger.get_state("k").unwrap().as_deref(), Some(&b"v"[..]));
    }

    #[test]
    fn put_with_flag_stores_identical_bytes() {
        let ledger = MemoryLedger::new();
        write_transaction(
            &ledger,
            &mut OsRng,
            &args(&["put", "k", "hello\0world", "enable"]),
            "enable",
        )
        .unwrap();
        assert_eq!(
            ledger.get_state("k").unwrap().as_deref(),
            Some(&b"hello\0world"[..])
        );
    }

    #[test]
    fn put_with_other_fourth_arg_stores_plain() {
        let ledger = MemoryLedger::new();
        write_transaction(
            &ledger,
            &mut OsRng,
            &args(&["put", "k", "v", "disable"]),
            "enable",
        )
        .unwrap();
        assert_eq!(ledger.get_state("k").unwrap().as_deref(), Some(&b"v"[..]));
    }

    #[test]
    fn put_arity() {
        let ledger = MemoryLedger::new();
        for bad in [&["put", "k"][..], &["put", "k", "v", "enable", "extra"][..]] {
            let err = write_transaction(&ledger, &mut OsRng, &args(bad), "enable").unwrap_err();
            assert_eq!(
                err,
                ChaincodeError::InvalidArgumentCount {
                    scope: "put".into(),
                    got: bad.len()
                }
            );
        }
        assert!(ledger.is_empty().unwrap());
    }

    #[test]
    fn put_store_error_is_write_failure() {
        let mut store = MockStateStore::new();
        store
            .expect_put_state()
            .with(eq("k"), eq(Bytes::from_static(b"v")))
            .times(1)
            .returning(|_, _| Err(LedgerError::Rejected("read-only".into())));
        let err = write_transaction(&store, &mut OsRng, &args(&["put", "k", "v"]), "enable")
            .unwrap_err();
        assert!(matches!(err, ChaincodeError::StoreWriteFailed { ref key, .. } if key == "k"));
        assert!(err.to_string().contains("read-only"));
    }

    #[test]
    fn put_cipher_failure_is_typed_and_skips_store() {
        // No put_state expectation: a write would panic the mock.
        let store = MockStateStore::new();
        let err = write_transaction(
            &store,
            &mut Drained,
            &args(&["put", "k", "v", "enable"]),
            "enable",
        )
        .unwrap_err();
        assert!(matches!(err, ChaincodeError::EntropyUnavailable(_)));
        assert_eq!(err.status(), 500);
    }

    #[test]
    fn get_returns_raw_bytes() {
        let ledger = MemoryLedger::new();
        ledger.put_state("k", Bytes::from_static(b"\x00\x01")).unwrap();
        let v = read_transaction(&ledger, &args(&["get", "k", "ignored"])).unwrap();
        assert_eq!(&v[..], b"\x00\x01");
    }

    #[test]
    fn get_missing_key() {
        let ledger = MemoryLedger::new();
        let err = read_transaction(&ledger, &args(&["get", "missing"])).unwrap_err();
        assert_eq!(err, ChaincodeError::KeyNotFound("missing".into()));
    }

    #[test]
    fn get_store_error_is_read_failure() {
        let mut store = MockStateStore::new();
        store
            .expect_get_state()
            .with(eq("k"))
            .returning(|_| Err(LedgerError::Unavailable("peer down".into())));
        let err = read_transaction(&store, &args(&["get", "k"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::StoreReadFailed { .. }));
    }

    #[test]
    fn get_without_key() {
        let ledger = MemoryLedger::new();
        let err = read_transaction(&ledger, &args(&["get"])).unwrap_err();
        assert!(matches!(err, ChaincodeError::InvalidArgumentCount { got: 1, .. }));
    }
}

//! Development host: drives a [`Dispatcher`] from newline-delimited JSON.
//!
//! Each non-blank input line is one [`InvocationRequest`]; each produces exactly
//! one [`Response`] line on the output. Requests are served strictly in order.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use common::{ChaincodeError, InvocationRequest, Response};
use rand::TryRngCore;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dispatch::Dispatcher;
use crate::ledger::StateStore;

/// Serve requests from `reader` until EOF, writing responses to `writer`.
///
/// A line that is not a valid request, including one that is not UTF-8, is
/// answered with a `bad_request` response; the loop keeps going. Requests without a `tx_id` are assigned a
/// random one for log correlation.
///
/// Returns the number of requests answered.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub fn run<S, E, R, W>(
    dispatcher: &Dispatcher<S, E>,
    mut reader: R,
    mut writer: W,
) -> Result<usize>
where
    S: StateStore,
    E: TryRngCore + Clone,
    R: BufRead,
    W: Write,
{
    let mut served = 0usize;
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .context("failed to read request")?;
        if read == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let response = match serde_json::from_slice::<InvocationRequest>(&line) {
            Ok(mut req) => {
                let tx_id = req
                    .tx_id
                    .get_or_insert_with(|| Uuid::new_v4().to_string());
                debug!(tx_id = %tx_id, phase = ?req.phase, "request received");
                dispatcher.handle(&req)
            }
            Err(e) => {
                warn!(error = %e, "malformed request");
                Response::error(&ChaincodeError::BadRequest(e.to_string()))
            }
        };

        serde_json::to_writer(&mut writer, &response).context("failed to encode response")?;
        writer.write_all(b"\n").context("failed to write response")?;
        writer.flush().context("failed to flush response")?;
        served += 1;
    }

    info!(served, "input closed");
    Ok(served)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchSettings;
    use crate::ledger::MemoryLedger;

    fn serve(input: &str) -> (usize, Vec<Response>) {
        let d = Dispatcher::new(MemoryLedger::new(), DispatchSettings::default());
        let mut out = Vec::new();
        let n = run(&d, input.as_bytes(), &mut out).unwrap();
        let responses = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (n, responses)
    }

    #[test]
    fn put_then_get_over_lines() {
        let input = concat!(
            r#"{"phase":"init","function":"init"}"#,
            "\n",
            r#"{"function":"invoke","args":["put","k","v","enable"]}"#,
            "\n\n",
            r#"{"function":"invoke","args":["get","k"],"tx_id":"tx-7"}"#,
            "\n",
        );
        let (n, responses) = serve(input);
        assert_eq!(n, 3);
        assert_eq!(responses[0], Response::ok());
        assert_eq!(responses[1].payload.as_deref(), Some(&b"OK"[..]));
        assert_eq!(responses[2].payload.as_deref(), Some(&b"v"[..]));
    }

    #[test]
    fn malformed_line_does_not_stop_loop() {
        let input = "not json\n{\"function\":\"invoke\",\"args\":[\"get\",\"missing\"]}\n";
        let (n, responses) = serve(input);
        assert_eq!(n, 2);
        assert_eq!(responses[0].status, 400);
        assert!(responses[0].message.starts_with("bad request"));
        assert_eq!(responses[1].status, 400);
        assert!(responses[1].message.contains("missing"));
    }

    #[test]
    fn non_utf8_line_is_answered_and_loop_continues() {
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(br#"{"function":"invoke","args":["put","k","v"]}"#);
        input.push(b'\n');
        input.extend_from_slice(br#"{"function":"invoke","args":["get","k"]}"#);

        let d = Dispatcher::new(MemoryLedger::new(), DispatchSettings::default());
        let mut out = Vec::new();
        let n = run(&d, input.as_slice(), &mut out).unwrap();
        assert_eq!(n, 3);

        let responses: Vec<Response> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses[0].status, 400);
        assert!(responses[0].message.starts_with("bad request"));
        assert_eq!(responses[1].payload.as_deref(), Some(&b"OK"[..]));
        // Last line has no trailing newline and is still served.
        assert_eq!(responses[2].payload.as_deref(), Some(&b"v"[..]));
    }

    #[test]
    fn empty_input() {
        let (n, responses) = serve("");
        assert_eq!(n, 0);
        assert!(responses.is_empty());
    }
}

//! Hook command - delivers one host event read from stdin
//!
//! The host runs `context-capture hook <host-event>` with the event payload
//! on stdin. Capture failures are logged and never change the exit status.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::sync::Arc;

use crate::host::{subscribe_all, LocalHost};
use crate::lifecycle::ContextCapture;

/// Parse a payload; empty input means no payload.
pub fn parse_payload(raw: &str) -> Result<Option<Value>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(raw).context("Hook payload is not valid JSON")?;
    Ok(Some(value))
}

/// Route `host_event` through a local host subscribed to the capture bridge.
///
/// Returns how many handlers received the event (0 for unmapped names).
pub fn execute(
    capture: Arc<ContextCapture>,
    host_event: &str,
    input: &mut dyn Read,
) -> Result<usize> {
    let mut raw = String::new();
    input
        .read_to_string(&mut raw)
        .context("Failed to read hook payload from stdin")?;
    let payload = parse_payload(&raw)?;

    let logger = capture.router().logger();
    let mut host = LocalHost::new(Some(capture.config().project.root().to_path_buf()), logger);
    subscribe_all(&mut host, &capture);

    let delivered = host.emit(host_event, payload);
    if delivered == 0 {
        tracing::debug!(host_event, "no context capture handler for host event");
    }
    Ok(delivered)
}

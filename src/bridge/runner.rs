//! Subprocess execution with stdin payload and captured stderr.

use std::ffi::OsString;
use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use crate::error::{CaptureError, Result};

/// Everything needed to start one capture subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub program: String,
    pub args: Vec<OsString>,
    /// Written to stdin, which is then closed.
    pub stdin: Vec<u8>,
    pub cwd: PathBuf,
    /// Added on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

/// How a subprocess ended. `exit_code` is `None` when killed by a signal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutcome {
    pub exit_code: Option<i32>,
    pub stderr: String,
}

/// Runs a [`SpawnRequest`] to completion.
///
/// Returns `Err` only when the process could not be started or fed;
/// a non-zero exit is still `Ok` and classified by the caller.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, request: &SpawnRequest) -> Result<ProcessOutcome>;
}

/// Real subprocesses via `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, request: &SpawnRequest) -> Result<ProcessOutcome> {
        let mut child = Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.cwd)
            .envs(request.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| CaptureError::Spawn {
                interpreter: request.program.clone(),
                source,
            })?;

        let Some(mut stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CaptureError::StdinUnavailable);
        };

        // Drain stderr before writing stdin; a child that fills the stderr
        // pipe while we block on a large payload would otherwise deadlock.
        let stderr_reader = child
            .stderr
            .take()
            .map(|stderr| thread::spawn(move || read_stream_to_string(stderr)));

        write_payload(&mut stdin, &request.stdin);
        drop(stdin);

        let status = child.wait().map_err(|e| {
            CaptureError::io(
                format!("Failed to wait for {}", request.program),
                e,
            )
        })?;

        let stderr = match stderr_reader {
            Some(handle) => handle.join().unwrap_or_default(),
            None => String::new(),
        };

        Ok(ProcessOutcome {
            exit_code: status.code(),
            stderr,
        })
    }
}

/// Write the payload to the child's stdin. A child may exit without reading,
/// so a broken pipe is expected; its exit status decides the outcome.
fn write_payload<W: Write>(stdin: &mut W, payload: &[u8]) {
    if let Err(e) = stdin.write_all(payload) {
        if e.kind() != ErrorKind::BrokenPipe {
            tracing::warn!(error = %e, "failed to write capture payload to stdin");
        }
    }
}

fn read_stream_to_string<R: Read>(mut stream: R) -> String {
    let mut buf = Vec::new();
    let _ = stream.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

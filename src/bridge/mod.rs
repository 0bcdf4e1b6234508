//! Process bridge: runs the capture script for one event.
//!
//! Protocol: `<interpreter> <capture-script> <event-tag>`, the JSON payload on
//! stdin followed by EOF, diagnostics on stderr, exit code 0 for success.

mod runner;

pub use runner::{ProcessOutcome, ProcessRunner, SpawnRequest, SystemRunner};

use std::sync::Arc;

use crate::config::{BridgeConfig, Environment, ENV_PROJECT_DIR, ENV_PROJECT_ROOT};
use crate::error::{CaptureError, Result};
use crate::events::CaptureEvent;
use crate::hooks::HookDirectoryLayout;
use crate::host::HostLogger;

/// Spawns the capture script and classifies its exit.
pub struct ProcessBridge {
    runner: Arc<dyn ProcessRunner>,
    config: BridgeConfig,
    layout: HookDirectoryLayout,
    env: Arc<dyn Environment>,
    logger: Arc<dyn HostLogger>,
}

impl ProcessBridge {
    pub fn new(
        runner: Arc<dyn ProcessRunner>,
        config: BridgeConfig,
        layout: HookDirectoryLayout,
        env: Arc<dyn Environment>,
        logger: Arc<dyn HostLogger>,
    ) -> Self {
        Self {
            runner,
            config,
            layout,
            env,
            logger,
        }
    }

    /// Interpreter for the next invocation, read fresh from the environment
    /// unless pinned in the configuration.
    pub fn interpreter(&self) -> String {
        self.config.interpreter.resolve(self.env.as_ref())
    }

    /// Build the spawn request for `event`.
    pub fn request_for(&self, event: &CaptureEvent) -> Result<SpawnRequest> {
        let payload = event
            .serialized_payload()
            .map_err(|e| CaptureError::io("Failed to serialize capture payload", e.into()))?;
        let root = self.config.project.root();
        let root_str = root.display().to_string();

        Ok(SpawnRequest {
            program: self.interpreter(),
            args: vec![
                self.layout.capture_script().as_os_str().to_os_string(),
                event.kind.tag().into(),
            ],
            stdin: payload.into_bytes(),
            cwd: root.to_path_buf(),
            env: vec![
                (ENV_PROJECT_ROOT.to_string(), root_str.clone()),
                (ENV_PROJECT_DIR.to_string(), root_str),
            ],
        })
    }

    /// Run the capture script for `event` and wait for it to exit.
    ///
    /// Exit 0 (or termination by signal) with stderr output is logged as a
    /// warning and still succeeds.
    /// Never retries.
    pub fn invoke(&self, event: &CaptureEvent) -> Result<()> {
        let request = self.request_for(event)?;
        tracing::debug!(
            interpreter = %request.program,
            event = %event.kind,
            "spawning context capture script"
        );

        let outcome = self.runner.run(&request)?;
        self.classify(outcome)
    }

    fn classify(&self, outcome: ProcessOutcome) -> Result<()> {
        let diagnostics = outcome.stderr.trim();
        match outcome.exit_code {
            // No code means the child was killed by a signal; not a failure.
            Some(0) | None => {
                if !diagnostics.is_empty() {
                    self.logger
                        .warn(&format!("Context capture emitted warnings: {diagnostics}"));
                }
                Ok(())
            }
            Some(code) => Err(CaptureError::ProcessFailure {
                code,
                stderr: diagnostics.to_string(),
            }),
        }
    }
}

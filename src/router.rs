//! Event router: gates host events and hands them to the process bridge.
//!
//! Per event: not enabled → drop silently; capture script missing → warn once
//! per missing episode and drop; otherwise invoke the bridge. Bridge errors
//! are logged here and never reach the host.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::bridge::ProcessBridge;
use crate::events::{CaptureEvent, CaptureKind};
use crate::hooks::{EnableStore, HookDirectoryLayout, CAPTURE_SCRIPT};
use crate::host::HostLogger;

/// Command users run to reinstall the hooks.
pub const COMMAND_NAME: &str = "setup-context-capture";

/// Whether the missing-script warning was already emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingScriptState {
    #[default]
    Unknown,
    Logged,
}

/// What happened to a routed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Host name not in the event table.
    Unmapped,
    Disabled,
    ScriptMissing,
    Forwarded,
    Failed,
}

pub struct EventRouter {
    bridge: ProcessBridge,
    layout: HookDirectoryLayout,
    store: EnableStore,
    logger: Arc<dyn HostLogger>,
    missing_script: Mutex<MissingScriptState>,
}

impl EventRouter {
    pub fn new(
        bridge: ProcessBridge,
        layout: HookDirectoryLayout,
        logger: Arc<dyn HostLogger>,
    ) -> Self {
        let store = EnableStore::new(layout.enable_flag().to_path_buf());
        Self {
            bridge,
            layout,
            store,
            logger,
            missing_script: Mutex::new(MissingScriptState::Unknown),
        }
    }

    /// Host-facing entry point. Never fails.
    pub fn route(&self, host_event: &str, payload: Option<Value>) {
        let outcome = self.dispatch(host_event, payload);
        tracing::debug!(host_event, ?outcome, "routed host event");
    }

    /// Like [`route`](Self::route), reporting which gate the event stopped at.
    pub fn dispatch(&self, host_event: &str, payload: Option<Value>) -> RouteOutcome {
        match CaptureKind::from_host_event(host_event) {
            Some(kind) => self.forward(CaptureEvent::new(kind, payload)),
            None => RouteOutcome::Unmapped,
        }
    }

    /// Run the gate sequence for an already-mapped event.
    pub fn forward(&self, event: CaptureEvent) -> RouteOutcome {
        if !self.store.is_enabled() {
            return RouteOutcome::Disabled;
        }

        if !self.layout.capture_script().exists() {
            if self.transition_missing() {
                self.logger.warn(&format!(
                    "Context capture is enabled but {CAPTURE_SCRIPT} is missing. Run `{COMMAND_NAME} enable` to reinstall."
                ));
            }
            return RouteOutcome::ScriptMissing;
        }

        match self.bridge.invoke(&event) {
            Ok(()) => RouteOutcome::Forwarded,
            Err(e) => {
                self.logger.error(&format!(
                    "Context capture hook failed for event {}: {e}",
                    event.kind
                ));
                RouteOutcome::Failed
            }
        }
    }

    /// Start a new missing episode; called after a successful enable.
    pub fn reset_missing_script(&self) {
        *self.lock_missing() = MissingScriptState::Unknown;
    }

    pub fn missing_script_state(&self) -> MissingScriptState {
        *self.lock_missing()
    }

    pub fn bridge(&self) -> &ProcessBridge {
        &self.bridge
    }

    pub fn logger(&self) -> Arc<dyn HostLogger> {
        Arc::clone(&self.logger)
    }

    /// Move to `Logged`; true when this call made the transition.
    fn transition_missing(&self) -> bool {
        let mut state = self.lock_missing();
        let first = *state == MissingScriptState::Unknown;
        *state = MissingScriptState::Logged;
        first
    }

    fn lock_missing(&self) -> std::sync::MutexGuard<'_, MissingScriptState> {
        self.missing_script
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

//! Host plugin runtime seam.
//!
//! The host supplies a project root, a three-level logger, and event
//! subscription. [`register`] wires the capture bridge into any host that
//! implements [`PluginHost`]; [`LocalHost`] is the in-process host used by
//! the `hook` subcommand.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::config::{BridgeConfig, Environment, ProcessEnvironment};
use crate::events::HOST_EVENTS;
use crate::lifecycle::ContextCapture;

pub const PLUGIN_NAME: &str = "context-capture";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logger exposed by the host.
pub trait HostLogger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards host log calls to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl HostLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(plugin = PLUGIN_NAME, "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(plugin = PLUGIN_NAME, "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(plugin = PLUGIN_NAME, "{message}");
    }
}

/// Handler invoked with an event's payload.
pub type HookHandler = Box<dyn Fn(Option<Value>) + Send + Sync>;

/// What the bridge needs from the surrounding runtime.
pub trait PluginHost {
    fn project_root(&self) -> Option<PathBuf>;
    fn logger(&self) -> Arc<dyn HostLogger>;
    fn subscribe(&mut self, event: &str, handler: HookHandler);
}

/// Build the bridge for `host` and subscribe it to every mapped host event.
///
/// The returned façade backs the `enable`/`disable`/`status` command surface.
pub fn register(
    host: &mut dyn PluginHost,
    assets_dir: Option<PathBuf>,
) -> std::io::Result<Arc<ContextCapture>> {
    let env: Arc<dyn Environment> = Arc::new(ProcessEnvironment);
    let config = BridgeConfig::resolve(host.project_root(), assets_dir, None, env.as_ref())?;
    let capture = Arc::new(ContextCapture::new(config, host.logger(), env));
    subscribe_all(host, &capture);
    Ok(capture)
}

/// Subscribe an existing façade to the host event table.
pub fn subscribe_all(host: &mut dyn PluginHost, capture: &Arc<ContextCapture>) {
    for &name in HOST_EVENTS {
        let capture = Arc::clone(capture);
        host.subscribe(
            name,
            Box::new(move |payload| capture.router().route(name, payload)),
        );
    }
    tracing::debug!(
        plugin = PLUGIN_NAME,
        version = PLUGIN_VERSION,
        events = HOST_EVENTS.len(),
        "registered context capture hooks"
    );
}

/// Minimal in-process host: a subscription table plus a logger.
pub struct LocalHost {
    project_root: Option<PathBuf>,
    logger: Arc<dyn HostLogger>,
    handlers: Mutex<HashMap<String, Vec<HookHandler>>>,
}

impl LocalHost {
    pub fn new(project_root: Option<PathBuf>, logger: Arc<dyn HostLogger>) -> Self {
        Self {
            project_root,
            logger,
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Deliver `payload` to every handler subscribed to `event`.
    ///
    /// Returns the number of handlers that received it.
    pub fn emit(&self, event: &str, payload: Option<Value>) -> usize {
        let handlers = self
            .handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let Some(subscribed) = handlers.get(event) else {
            return 0;
        };
        for handler in subscribed {
            handler(payload.clone());
        }
        subscribed.len()
    }

    pub fn subscribed_events(&self) -> Vec<String> {
        let handlers = self
            .handlers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut events: Vec<String> = handlers.keys().cloned().collect();
        events.sort();
        events
    }
}

impl PluginHost for LocalHost {
    fn project_root(&self) -> Option<PathBuf> {
        self.project_root.clone()
    }

    fn logger(&self) -> Arc<dyn HostLogger> {
        Arc::clone(&self.logger)
    }

    fn subscribe(&mut self, event: &str, handler: HookHandler) {
        self.handlers
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(event.to_string())
            .or_default()
            .push(handler);
    }
}

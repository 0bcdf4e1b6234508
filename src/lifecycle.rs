//! Lifecycle façade: `enable`, `disable`, `status`.
//!
//! Two states, Disabled and Enabled, each reachable from the other. Enable
//! installs the manifest before writing the marker, so an asset failure
//! leaves the gate untouched.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::bridge::{ProcessBridge, ProcessRunner, SystemRunner};
use crate::config::{locate_interpreter, BridgeConfig, Environment};
use crate::error::Result;
use crate::hooks::{AssetInstaller, EnableMarker, EnableStore, HookDirectoryLayout};
use crate::host::HostLogger;
use crate::router::EventRouter;

/// Read-only snapshot reported by [`ContextCapture::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureStatus {
    pub enabled: bool,
    pub scripts_present: bool,
    pub capture_script_path: PathBuf,
}

/// Composes installer, enable store and router for one project.
pub struct ContextCapture {
    config: BridgeConfig,
    layout: HookDirectoryLayout,
    installer: AssetInstaller,
    store: EnableStore,
    router: EventRouter,
}

impl ContextCapture {
    /// Façade backed by real subprocesses.
    pub fn new(
        config: BridgeConfig,
        logger: Arc<dyn HostLogger>,
        env: Arc<dyn Environment>,
    ) -> Self {
        Self::with_runner(config, logger, env, Arc::new(SystemRunner))
    }

    pub fn with_runner(
        config: BridgeConfig,
        logger: Arc<dyn HostLogger>,
        env: Arc<dyn Environment>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        let layout = HookDirectoryLayout::new(config.project.root());
        let installer = AssetInstaller::new(config.assets_dir.clone(), layout.clone());
        let store = EnableStore::new(layout.enable_flag().to_path_buf());
        let bridge = ProcessBridge::new(
            runner,
            config.clone(),
            layout.clone(),
            env,
            Arc::clone(&logger),
        );
        let router = EventRouter::new(bridge, layout.clone(), logger);

        Self {
            config,
            layout,
            installer,
            store,
            router,
        }
    }

    /// Install assets, write the marker, and start a fresh missing-script episode.
    pub fn enable(&self) -> Result<EnableMarker> {
        self.installer.install()?;
        let interpreter = locate_interpreter(&self.router.bridge().interpreter());
        let marker = self.store.mark_enabled(&interpreter)?;
        self.router.reset_missing_script();
        tracing::debug!(
            project = %self.config.project.root().display(),
            interpreter = %marker.interpreter_path,
            "context capture enabled"
        );
        Ok(marker)
    }

    /// Remove the marker. Installed assets stay on disk.
    pub fn disable(&self) -> Result<()> {
        self.store.mark_disabled()?;
        tracing::debug!(
            project = %self.config.project.root().display(),
            "context capture disabled"
        );
        Ok(())
    }

    pub fn status(&self) -> CaptureStatus {
        CaptureStatus {
            enabled: self.store.is_enabled(),
            scripts_present: self.layout.assets_present(),
            capture_script_path: self.layout.capture_script().to_path_buf(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    pub fn layout(&self) -> &HookDirectoryLayout {
        &self.layout
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

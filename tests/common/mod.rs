//! Shared fixtures for integration tests

#![allow(dead_code)]

use context_capture::bridge::{ProcessOutcome, ProcessRunner, SpawnRequest};
use context_capture::config::{BridgeConfig, InterpreterSource, ProjectContext, StaticEnvironment};
use context_capture::hooks::MANIFEST;
use context_capture::host::HostLogger;
use context_capture::{ContextCapture, Result};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Default)]
pub struct MemoryLogger {
    pub warnings: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl HostLogger for MemoryLogger {
    fn info(&self, _message: &str) {}

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// Counts spawns and exits with a fixed outcome.
pub struct CountingRunner {
    pub requests: Mutex<Vec<SpawnRequest>>,
    pub outcome: ProcessOutcome,
}

impl CountingRunner {
    pub fn exiting(code: i32, stderr: &str) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            outcome: ProcessOutcome {
                exit_code: Some(code),
                stderr: stderr.to_string(),
            },
        }
    }

    pub fn spawns(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ProcessRunner for CountingRunner {
    fn run(&self, request: &SpawnRequest) -> Result<ProcessOutcome> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.outcome.clone())
    }
}

pub fn seed_assets(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    for entry in MANIFEST {
        fs::write(dir.join(entry.filename), "# asset\n").unwrap();
    }
}

pub struct Project {
    pub root: TempDir,
    pub shared: TempDir,
    pub runner: Arc<CountingRunner>,
    pub logger: Arc<MemoryLogger>,
    pub capture: Arc<ContextCapture>,
}

pub fn project(runner: CountingRunner) -> Project {
    let root = TempDir::new().unwrap();
    let shared = TempDir::new().unwrap();
    seed_assets(shared.path());

    let runner = Arc::new(runner);
    let logger = Arc::new(MemoryLogger::default());
    let config = BridgeConfig::new(
        ProjectContext::new(root.path()),
        shared.path().to_path_buf(),
        InterpreterSource::Fixed("python3".to_string()),
    );
    let capture = Arc::new(ContextCapture::with_runner(
        config,
        logger.clone(),
        Arc::new(StaticEnvironment::new()),
        runner.clone(),
    ));
    Project {
        root,
        shared,
        runner,
        logger,
        capture,
    }
}

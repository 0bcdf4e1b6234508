//! Fakes shared by unit tests.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use crate::bridge::{ProcessOutcome, ProcessRunner, SpawnRequest};
use crate::error::{CaptureError, Result};
use crate::hooks::MANIFEST;
use crate::host::HostLogger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// Captures every log line.
#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(Level, String)>>,
}

impl RecordingLogger {
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: Level, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

impl HostLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}

/// Scripted response for one spawn.
pub enum Scripted {
    Exit(Option<i32>, &'static str),
    SpawnFails,
    NoStdin,
}

/// Records requests and replays scripted outcomes; defaults to a clean exit.
#[derive(Default)]
pub struct FakeRunner {
    requests: Mutex<Vec<SpawnRequest>>,
    script: Mutex<VecDeque<Scripted>>,
}

impl FakeRunner {
    pub fn with(outcomes: Vec<Scripted>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            script: Mutex::new(outcomes.into()),
        }
    }

    pub fn requests(&self) -> Vec<SpawnRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn spawn_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, request: &SpawnRequest) -> Result<ProcessOutcome> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Scripted::Exit(Some(0), ""));
        match next {
            Scripted::Exit(exit_code, stderr) => Ok(ProcessOutcome {
                exit_code,
                stderr: stderr.to_string(),
            }),
            Scripted::SpawnFails => Err(CaptureError::Spawn {
                interpreter: request.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
            Scripted::NoStdin => Err(CaptureError::StdinUnavailable),
        }
    }
}

pub fn seed_assets(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    for entry in MANIFEST {
        fs::write(dir.join(entry.filename), format!("# {}\n", entry.filename)).unwrap();
    }
}

//! Enable marker persistence.
//!
//! The marker file's existence is the on/off switch. Its JSON body is
//! informational and is never read back when deciding whether to forward.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, Result};

/// Body written to the enable flag file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnableMarker {
    pub enabled_at: DateTime<Utc>,
    pub interpreter_path: String,
}

impl EnableMarker {
    pub fn new(interpreter_path: impl Into<String>) -> Self {
        Self {
            enabled_at: Utc::now(),
            interpreter_path: interpreter_path.into(),
        }
    }
}

/// Reads and writes the enable flag at a fixed path.
#[derive(Debug, Clone)]
pub struct EnableStore {
    flag_path: PathBuf,
}

impl EnableStore {
    pub fn new(flag_path: PathBuf) -> Self {
        Self { flag_path }
    }

    pub fn flag_path(&self) -> &Path {
        &self.flag_path
    }

    /// Write a fresh marker, replacing any previous one.
    pub fn mark_enabled(&self, interpreter_path: &str) -> Result<EnableMarker> {
        if let Some(parent) = self.flag_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CaptureError::io(
                    format!("Failed to create hooks directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let marker = EnableMarker::new(interpreter_path);
        let content = serde_json::to_string_pretty(&marker)
            .map_err(|e| CaptureError::io("Failed to serialize enable marker", e.into()))?;
        fs::write(&self.flag_path, content).map_err(|e| {
            CaptureError::io(
                format!("Failed to write enable marker {}", self.flag_path.display()),
                e,
            )
        })?;
        Ok(marker)
    }

    /// Remove the marker. Already-disabled is not an error.
    pub fn mark_disabled(&self) -> Result<()> {
        match fs::remove_file(&self.flag_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CaptureError::io(
                format!("Failed to remove enable marker {}", self.flag_path.display()),
                e,
            )),
        }
    }

    /// Presence check only; checked fresh on every call.
    pub fn is_enabled(&self) -> bool {
        self.flag_path.exists()
    }
}

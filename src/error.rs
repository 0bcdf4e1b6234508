//! Error taxonomy for the capture bridge.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by installation, the enable-state store, and the process bridge.
///
/// `AssetMissing` and `Io` surface from the lifecycle operations and reach the
/// user. `Spawn`, `StdinUnavailable` and `ProcessFailure` come out of event
/// forwarding and are logged by the router instead of propagated.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// A manifest source file could not be read from the shared template directory.
    #[error("Missing required context capture asset: {}", path.display())]
    AssetMissing { path: PathBuf },

    /// The interpreter could not be started at all.
    #[error("failed to spawn context capture interpreter '{interpreter}': {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: io::Error,
    },

    /// The subprocess was started without a usable stdin pipe.
    #[error("Context capture process stdin unavailable")]
    StdinUnavailable,

    /// The subprocess ran and exited non-zero.
    #[error("context capture script exited with code {code}{}", describe_stderr(stderr))]
    ProcessFailure { code: i32, stderr: String },

    /// Filesystem failure while installing assets or writing the marker.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl CaptureError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        CaptureError::Io {
            context: context.into(),
            source,
        }
    }

    /// True for failures where the process never ran (spawn or pipe setup).
    pub fn is_spawn_failure(&self) -> bool {
        matches!(
            self,
            CaptureError::Spawn { .. } | CaptureError::StdinUnavailable
        )
    }
}

fn describe_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

pub type Result<T> = std::result::Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_failure_includes_code_and_trimmed_stderr() {
        let err = CaptureError::ProcessFailure {
            code: 2,
            stderr: "  boom\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "context capture script exited with code 2: boom"
        );
    }

    #[test]
    fn test_process_failure_without_stderr() {
        let err = CaptureError::ProcessFailure {
            code: 1,
            stderr: "\n".to_string(),
        };
        assert_eq!(err.to_string(), "context capture script exited with code 1");
    }

    #[test]
    fn test_asset_missing_names_path() {
        let err = CaptureError::AssetMissing {
            path: PathBuf::from("/shared/setup/context/context_capture_base.py"),
        };
        assert!(err
            .to_string()
            .contains("/shared/setup/context/context_capture_base.py"));
    }

    #[test]
    fn test_spawn_classification() {
        let spawn = CaptureError::Spawn {
            interpreter: "python3".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(spawn.is_spawn_failure());
        assert!(CaptureError::StdinUnavailable.is_spawn_failure());
        let failure = CaptureError::ProcessFailure {
            code: 1,
            stderr: String::new(),
        };
        assert!(!failure.is_spawn_failure());
    }
}

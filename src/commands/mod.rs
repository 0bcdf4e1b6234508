//! Command surface for `setup-context-capture`.
//!
//! Each action writes human-readable lines to the supplied writer; that text
//! is the only output contract.

pub mod disable;
pub mod enable;
pub mod hook;
pub mod status;

use anyhow::{bail, Result};
use std::io::Write;
use std::str::FromStr;

use crate::lifecycle::ContextCapture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    Enable,
    Disable,
    #[default]
    Status,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "enable" => Ok(Action::Enable),
            "disable" => Ok(Action::Disable),
            "status" => Ok(Action::Status),
            other => bail!("Unknown action \"{other}\". Use one of: enable, disable, status."),
        }
    }
}

/// Run the command with raw host arguments; no argument means `status`.
pub fn run_command(capture: &ContextCapture, args: &[String], out: &mut dyn Write) -> Result<()> {
    let action = match args.first() {
        Some(arg) => arg.parse()?,
        None => Action::default(),
    };
    execute(capture, action, out)
}

pub fn execute(capture: &ContextCapture, action: Action, out: &mut dyn Write) -> Result<()> {
    match action {
        Action::Enable => enable::execute(capture, out),
        Action::Disable => disable::execute(capture, out),
        Action::Status => status::execute(capture, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BridgeConfig, InterpreterSource, ProjectContext, StaticEnvironment};
    use crate::host::TracingLogger;
    use crate::test_support::{seed_assets, FakeRunner};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn capture(project: &TempDir, shared: &TempDir) -> ContextCapture {
        let config = BridgeConfig::new(
            ProjectContext::new(project.path()),
            shared.path().to_path_buf(),
            InterpreterSource::Fixed("python3".to_string()),
        );
        ContextCapture::with_runner(
            config,
            Arc::new(TracingLogger),
            Arc::new(StaticEnvironment::new()),
            Arc::new(FakeRunner::default()),
        )
    }

    fn run(capture: &ContextCapture, args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut out = Vec::new();
        run_command(capture, &args, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("enable".parse::<Action>().unwrap(), Action::Enable);
        assert_eq!("disable".parse::<Action>().unwrap(), Action::Disable);
        assert_eq!("status".parse::<Action>().unwrap(), Action::Status);
        let err = "purge".parse::<Action>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown action \"purge\". Use one of: enable, disable, status."
        );
    }

    #[test]
    fn test_default_action_is_status() {
        let project = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        let output = run(&capture(&project, &shared), &[]).unwrap();
        assert!(output.contains("Context capture is disabled."));
        assert!(output.contains("Hook scripts are missing."));
    }

    #[test]
    fn test_enable_disable_output() {
        let project = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        seed_assets(shared.path());
        let capture = capture(&project, &shared);

        let output = run(&capture, &["enable"]).unwrap();
        assert!(output.contains("Context capture enabled. Scripts present: yes."));

        let output = run(&capture, &["status"]).unwrap();
        assert!(output.contains("Context capture is enabled."));
        assert!(output.contains("Hook scripts located at"));
        assert!(output.contains("context_bundle_capture_opencode.py"));

        let output = run(&capture, &["disable"]).unwrap();
        assert!(output
            .contains("Context capture disabled. Hooks remain installed but will not execute."));
    }

    #[test]
    fn test_enable_failure_propagates() {
        let project = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        let err = run(&capture(&project, &shared), &["enable"]).unwrap_err();
        assert!(err.to_string().contains("Failed to enable context capture"));
        assert!(format!("{err:#}").contains("Missing required context capture asset"));
    }

    #[test]
    fn test_unknown_action_is_error() {
        let project = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        assert!(run(&capture(&project, &shared), &["restart"]).is_err());
    }
}

//! Status command - reports the gate and asset presence

use anyhow::Result;
use colored::Colorize;
use std::io::Write;

use crate::lifecycle::ContextCapture;
use crate::router::COMMAND_NAME;

pub fn execute(capture: &ContextCapture, out: &mut dyn Write) -> Result<()> {
    let status = capture.status();

    if status.enabled {
        writeln!(out, "{} Context capture is enabled.", "●".green())?;
    } else {
        writeln!(out, "{} Context capture is disabled.", "○".dimmed())?;
    }

    if status.scripts_present {
        writeln!(
            out,
            "Hook scripts located at {}.",
            status.capture_script_path.display()
        )?;
    } else {
        writeln!(
            out,
            "{} Hook scripts are missing. Run `opencode {COMMAND_NAME} enable`.",
            "!".yellow().bold()
        )?;
    }
    Ok(())
}

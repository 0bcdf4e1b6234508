//! Disable command - removes the enable marker, leaves assets installed

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;

use crate::lifecycle::ContextCapture;

pub fn execute(capture: &ContextCapture, out: &mut dyn Write) -> Result<()> {
    capture
        .disable()
        .context("Failed to disable context capture")?;

    writeln!(
        out,
        "{} Context capture disabled. Hooks remain installed but will not execute.",
        "─".dimmed()
    )?;
    Ok(())
}

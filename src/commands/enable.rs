//! Enable command - installs hook assets and turns capture on

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;

use crate::lifecycle::ContextCapture;

pub fn execute(capture: &ContextCapture, out: &mut dyn Write) -> Result<()> {
    capture
        .enable()
        .context("Failed to enable context capture")?;
    let status = capture.status();

    writeln!(
        out,
        "{} Context capture enabled. Scripts present: {}.",
        "✓".green().bold(),
        if status.scripts_present { "yes" } else { "no" }
    )?;
    Ok(())
}

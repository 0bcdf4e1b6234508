use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use context_capture::commands::{self, hook, Action};
use context_capture::config::{BridgeConfig, ProcessEnvironment};
use context_capture::host::TracingLogger;
use context_capture::ContextCapture;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "context-capture")]
#[command(about = "Install and manage context capture hooks for session history bundling.", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root (defaults to $OPENCODE_PROJECT_ROOT, then the current directory)
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,

    /// Directory holding the shared capture assets
    #[arg(long, global = true)]
    assets_dir: Option<PathBuf>,

    /// Interpreter for the capture script (defaults to $OPENCODE_PYTHON, $PYTHON, python3)
    #[arg(long, global = true)]
    python: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install hook assets and start forwarding events
    Enable,

    /// Stop forwarding events; installed assets are kept
    Disable,

    /// Show whether capture is enabled and the assets are present
    Status,

    /// Deliver one host event, reading its JSON payload from stdin
    Hook {
        /// Host event name (e.g. tool.execute.after)
        event: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = BridgeConfig::resolve(
        cli.project_root,
        cli.assets_dir,
        cli.python,
        &ProcessEnvironment,
    )
    .context("Failed to resolve project root")?;
    let capture = Arc::new(ContextCapture::new(
        config,
        Arc::new(TracingLogger),
        Arc::new(ProcessEnvironment),
    ));

    let action = match cli.command {
        Some(Commands::Hook { event }) => {
            hook::execute(capture, &event, &mut io::stdin().lock())?;
            return Ok(());
        }
        Some(Commands::Enable) => Action::Enable,
        Some(Commands::Disable) => Action::Disable,
        Some(Commands::Status) | None => Action::Status,
    };

    commands::execute(&capture, action, &mut io::stdout().lock())
}

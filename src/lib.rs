//! Forwards host lifecycle events to the context capture script.
//!
//! A host raises `tool.execute.after`, `session.start` and
//! `user.prompt.submitted`; when capture is enabled for the project and the
//! hook assets are installed, each event is written as JSON to a fresh
//! `<interpreter> <capture-script> <tag>` subprocess.

pub mod bridge;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod host;
pub mod lifecycle;
pub mod router;

#[cfg(test)]
mod test_support;

pub use error::{CaptureError, Result};
pub use lifecycle::{CaptureStatus, ContextCapture};

//! Per-project hook directory for context capture.
//!
//! This module owns everything that lives under `<root>/.opencode/hooks/`:
//! - the derived path layout
//! - the fixed asset manifest and its installer
//! - the enable marker that gates event forwarding
//!
//! ## Layout
//!
//! ```text
//! <root>/.opencode/hooks/
//!   context_capture_base.py
//!   context_bundle_capture_opencode.py   (0755)
//!   sensitive_data_redactor.py           (0755)
//!   context_capture_config.json
//!   .context-capture-enabled
//! ```

mod layout;
mod manifest;
mod state;


pub use layout::{HookDirectoryLayout, ENABLE_FLAG_FILENAME, HOOKS_SUBDIR};
pub use manifest::{
    AssetEntry, AssetInstaller, BASE_MODULE, CAPTURE_SCRIPT, CONFIG_FILE, MANIFEST,
    REDACTOR_SCRIPT,
};
pub use state::{EnableMarker, EnableStore};

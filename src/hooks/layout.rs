//! Paths derived from the project root.

use std::path::{Path, PathBuf};

use super::manifest::{BASE_MODULE, CAPTURE_SCRIPT, CONFIG_FILE, MANIFEST, REDACTOR_SCRIPT};

/// Hook directory relative to the project root.
pub const HOOKS_SUBDIR: &str = ".opencode/hooks";

/// Marker whose presence means capture is enabled.
pub const ENABLE_FLAG_FILENAME: &str = ".context-capture-enabled";

/// Paths under `<root>/.opencode/hooks/`, computed once and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookDirectoryLayout {
    hooks_dir: PathBuf,
    base_module: PathBuf,
    capture_script: PathBuf,
    redactor_script: PathBuf,
    config_file: PathBuf,
    enable_flag: PathBuf,
}

impl HookDirectoryLayout {
    pub fn new(project_root: &Path) -> Self {
        let hooks_dir = project_root.join(HOOKS_SUBDIR);

        Self {
            base_module: hooks_dir.join(BASE_MODULE),
            capture_script: hooks_dir.join(CAPTURE_SCRIPT),
            redactor_script: hooks_dir.join(REDACTOR_SCRIPT),
            config_file: hooks_dir.join(CONFIG_FILE),
            enable_flag: hooks_dir.join(ENABLE_FLAG_FILENAME),
            hooks_dir,
        }
    }

    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    pub fn base_module(&self) -> &Path {
        &self.base_module
    }

    pub fn capture_script(&self) -> &Path {
        &self.capture_script
    }

    pub fn redactor_script(&self) -> &Path {
        &self.redactor_script
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn enable_flag(&self) -> &Path {
        &self.enable_flag
    }

    /// Destination path of a manifest file inside the hook directory.
    pub fn destination(&self, filename: &str) -> PathBuf {
        self.hooks_dir.join(filename)
    }

    /// True when every manifest entry exists at its destination.
    pub fn assets_present(&self) -> bool {
        MANIFEST
            .iter()
            .all(|entry| self.destination(entry.filename).exists())
    }
}

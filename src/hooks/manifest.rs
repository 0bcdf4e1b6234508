//! The fixed asset manifest and its installer.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CaptureError, Result};

use super::layout::HookDirectoryLayout;

pub const BASE_MODULE: &str = "context_capture_base.py";
pub const CAPTURE_SCRIPT: &str = "context_bundle_capture_opencode.py";
pub const REDACTOR_SCRIPT: &str = "sensitive_data_redactor.py";
pub const CONFIG_FILE: &str = "context_capture_config.json";

/// One file copied from the shared template directory into the hook directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetEntry {
    pub filename: &'static str,
    /// Set owner/group/other execute bits after copying.
    pub executable: bool,
}

/// Installed in this order.
pub const MANIFEST: &[AssetEntry] = &[
    AssetEntry {
        filename: BASE_MODULE,
        executable: false,
    },
    AssetEntry {
        filename: CAPTURE_SCRIPT,
        executable: true,
    },
    AssetEntry {
        filename: REDACTOR_SCRIPT,
        executable: true,
    },
    AssetEntry {
        filename: CONFIG_FILE,
        executable: false,
    },
];

/// Copies the manifest from a shared source directory into a project's hook directory.
#[derive(Debug, Clone)]
pub struct AssetInstaller {
    source_dir: PathBuf,
    layout: HookDirectoryLayout,
}

impl AssetInstaller {
    pub fn new(source_dir: PathBuf, layout: HookDirectoryLayout) -> Self {
        Self { source_dir, layout }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Install every manifest entry, overwriting what is already there.
    ///
    /// All sources are checked before the first copy, so a missing asset
    /// fails with [`CaptureError::AssetMissing`] without touching the hook
    /// directory. Never writes under the source directory.
    pub fn install(&self) -> Result<()> {
        for entry in MANIFEST {
            self.check_source(entry)?;
        }

        let hooks_dir = self.layout.hooks_dir();
        fs::create_dir_all(hooks_dir).map_err(|e| {
            CaptureError::io(
                format!("Failed to create hooks directory {}", hooks_dir.display()),
                e,
            )
        })?;

        for entry in MANIFEST {
            self.install_entry(entry)?;
        }

        tracing::debug!(
            hooks_dir = %hooks_dir.display(),
            count = MANIFEST.len(),
            "installed context capture assets"
        );
        Ok(())
    }

    fn source_path(&self, entry: &AssetEntry) -> PathBuf {
        self.source_dir.join(entry.filename)
    }

    /// The source must be a regular file we can open for reading.
    fn check_source(&self, entry: &AssetEntry) -> Result<()> {
        let source = self.source_path(entry);
        let readable = fs::metadata(&source)
            .map(|meta| meta.is_file())
            .unwrap_or(false)
            && fs::File::open(&source).is_ok();

        if readable {
            Ok(())
        } else {
            Err(CaptureError::AssetMissing { path: source })
        }
    }

    fn install_entry(&self, entry: &AssetEntry) -> Result<()> {
        let source = self.source_path(entry);
        let destination = self.layout.destination(entry.filename);

        fs::copy(&source, &destination).map_err(|e| {
            CaptureError::io(
                format!(
                    "Failed to copy {} to {}",
                    source.display(),
                    destination.display()
                ),
                e,
            )
        })?;

        if entry.executable {
            make_executable(&destination)?;
        }
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)
        .map_err(|e| {
            CaptureError::io(format!("Failed to get metadata for {}", path.display()), e)
        })?
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).map_err(|e| {
        CaptureError::io(format!("Failed to set permissions on {}", path.display()), e)
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

//! Bridge configuration resolved once at construction.
//!
//! All environment reads go through [`Environment`] so resolution is explicit:
//! the project root and asset directory are fixed when the bridge is built,
//! while the interpreter may be re-resolved on every invocation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Project-root override consumed at construction and exported to the subprocess.
pub const ENV_PROJECT_ROOT: &str = "OPENCODE_PROJECT_ROOT";
/// Second project-root variable exported to the subprocess.
pub const ENV_PROJECT_DIR: &str = "OPENCODE_PROJECT_DIR";
/// Host-specific interpreter override.
pub const ENV_PYTHON_SPECIFIC: &str = "OPENCODE_PYTHON";
/// Generic interpreter override.
pub const ENV_PYTHON_GENERIC: &str = "PYTHON";
/// Shared template directory override.
pub const ENV_ASSETS_DIR: &str = "CONTEXT_CAPTURE_ASSETS_DIR";

/// Interpreter used when neither override is set.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Location of the shared templates relative to a checkout or install prefix.
pub const SHARED_ASSETS_SUBDIR: &str = "shared/setup/context";

/// Source of environment variables.
pub trait Environment: Send + Sync {
    fn var(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

/// Fixed set of variables, for tests and embedding hosts.
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl Environment for StaticEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// The project this bridge serves. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    root: PathBuf,
}

impl ProjectContext {
    /// A relative root is anchored at the current directory, since the
    /// subprocess runs with the root as its working directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = std::path::absolute(&root).unwrap_or(root);
        Self { root }
    }

    /// Resolve the root from an explicit path, then `OPENCODE_PROJECT_ROOT`,
    /// then the current working directory.
    pub fn resolve(explicit: Option<PathBuf>, env: &dyn Environment) -> std::io::Result<Self> {
        let root = match explicit {
            Some(root) => root,
            None => match env.var(ENV_PROJECT_ROOT) {
                Some(root) => PathBuf::from(root),
                None => std::env::current_dir()?,
            },
        };
        Ok(Self {
            root: std::path::absolute(root)?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Where the interpreter path comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterSource {
    /// Pinned at construction (e.g. `--python` on the command line).
    Fixed(String),
    /// `OPENCODE_PYTHON`, then `PYTHON`, then `python3`, read on every call.
    Environment,
}

impl InterpreterSource {
    pub fn resolve(&self, env: &dyn Environment) -> String {
        match self {
            InterpreterSource::Fixed(interpreter) => interpreter.clone(),
            InterpreterSource::Environment => env
                .var(ENV_PYTHON_SPECIFIC)
                .or_else(|| env.var(ENV_PYTHON_GENERIC))
                .unwrap_or_else(|| DEFAULT_INTERPRETER.to_string()),
        }
    }
}

/// Resolve an interpreter name to a full path on `PATH`, falling back to the
/// name itself. Only used for the informational enable marker.
pub fn locate_interpreter(interpreter: &str) -> String {
    match which::which(interpreter) {
        Ok(path) => path.display().to_string(),
        Err(_) => interpreter.to_string(),
    }
}

/// Everything the bridge needs, resolved once.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub project: ProjectContext,
    /// Shared template directory the manifest is copied from.
    pub assets_dir: PathBuf,
    pub interpreter: InterpreterSource,
}

impl BridgeConfig {
    pub fn new(project: ProjectContext, assets_dir: PathBuf, interpreter: InterpreterSource) -> Self {
        Self {
            project,
            assets_dir,
            interpreter,
        }
    }

    /// Build a configuration from optional explicit values and the environment.
    pub fn resolve(
        project_root: Option<PathBuf>,
        assets_dir: Option<PathBuf>,
        interpreter: Option<String>,
        env: &dyn Environment,
    ) -> std::io::Result<Self> {
        let project = ProjectContext::resolve(project_root, env)?;
        let assets_dir = assets_dir.unwrap_or_else(|| find_assets_dir(env));
        let interpreter = match interpreter {
            Some(interpreter) => InterpreterSource::Fixed(interpreter),
            None => InterpreterSource::Environment,
        };
        Ok(Self::new(project, assets_dir, interpreter))
    }
}

/// Find the shared template directory
///
/// Looks for assets in:
/// 1. `$CONTEXT_CAPTURE_ASSETS_DIR`
/// 2. Relative to the binary: `./shared/setup/context` or `../shared/setup/context`
/// 3. `shared/setup/context` under the current directory
/// 4. `<data dir>/context-capture/assets`
///
/// Falls back to the relative default so a later install reports the concrete
/// missing path instead of failing here.
pub fn find_assets_dir(env: &dyn Environment) -> PathBuf {
    if let Some(dir) = env.var(ENV_ASSETS_DIR) {
        let path = PathBuf::from(dir);
        if path.exists() {
            return path;
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(parent) = exe_path.parent() {
            let candidate = parent.join(SHARED_ASSETS_SUBDIR);
            if candidate.exists() {
                return candidate;
            }

            if let Some(grandparent) = parent.parent() {
                let candidate = grandparent.join(SHARED_ASSETS_SUBDIR);
                if candidate.exists() {
                    return candidate;
                }
            }
        }
    }

    let cwd_assets = PathBuf::from(SHARED_ASSETS_SUBDIR);
    if cwd_assets.exists() {
        return cwd_assets;
    }

    if let Some(data_dir) = dirs::data_dir() {
        let installed = data_dir.join("context-capture").join("assets");
        if installed.exists() {
            return installed;
        }
    }

    env.var(ENV_ASSETS_DIR)
        .map(PathBuf::from)
        .unwrap_or(cwd_assets)
}

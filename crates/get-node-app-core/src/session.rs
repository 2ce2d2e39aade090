//! Per-run session state and the on-disk data directories it points at

use crate::env::PackageManager;
use crate::error::ScaffoldError;
use crate::project::is_plain_name;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Data directories under the per-user application root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub logs_dir: PathBuf,
    pub templates_dir: PathBuf,
}

impl AppDirs {
    /// Create `logs/` and `templates/` under `root` if they don't exist yet
    pub async fn create(root: &Path) -> Result<Self, ScaffoldError> {
        let dirs = Self {
            logs_dir: root.join("logs"),
            templates_dir: root.join("templates"),
        };

        for dir in [&dirs.logs_dir, &dirs.templates_dir] {
            fs::create_dir_all(dir).await.map_err(|e| {
                ScaffoldError::filesystem(
                    &e,
                    format!("Failed to create app data directory {}", dir.display()),
                )
            })?;
        }

        Ok(dirs)
    }
}

/// A project name: non-empty and a single directory name, so the project
/// always lands directly under the working directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub const EMPTY_MESSAGE: &'static str = "project name cannot be empty";
    pub const PATH_MESSAGE: &'static str = "project name must be a single directory name";

    pub fn parse(input: impl Into<String>) -> Result<Self, &'static str> {
        let input = input.into();
        if input.is_empty() {
            return Err(Self::EMPTY_MESSAGE);
        }
        if !is_plain_name(&input) {
            return Err(Self::PATH_MESSAGE);
        }
        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for ProjectName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Session record, owned and mutated only by the pipeline
#[derive(Debug, Clone)]
pub struct Session {
    pub debug_enabled: bool,
    pub logs_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub package_manager: Option<PackageManager>,
    pub template_name: Option<String>,
    pub project_name: Option<ProjectName>,
}

impl Session {
    pub fn new(debug_enabled: bool, dirs: AppDirs) -> Self {
        Self {
            debug_enabled,
            logs_dir: dirs.logs_dir,
            templates_dir: dirs.templates_dir,
            package_manager: None,
            template_name: None,
            project_name: None,
        }
    }
}

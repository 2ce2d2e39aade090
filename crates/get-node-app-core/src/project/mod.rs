//! Project materialization: create the project directory, then fill it from
//! the template cache.
//!
//! The two steps run as separate pipeline stages and fail independently.
//! Nothing is rolled back: if copying fails the freshly created directory
//! stays behind.

pub mod copier;

pub use copier::copy_tree;

use crate::error::ScaffoldError;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// True when `name` is exactly one ordinary path component
///
/// Rejects empty names, `.` and `..`, absolute paths and anything with a
/// separator, so `parent.join(name)` always lands directly under `parent`.
pub fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => part == name,
        _ => false,
    }
}

/// Create `project_root/project_name`; fails if it already exists
pub async fn create_project_dir(
    project_root: &Path,
    project_name: &str,
) -> Result<PathBuf, ScaffoldError> {
    let project_dir = project_root.join(project_name);
    fs::create_dir(&project_dir).await.map_err(|e| {
        ScaffoldError::filesystem(&e, format!("Failed to create project {}", project_name))
    })?;
    Ok(project_dir)
}

/// Copy the cached `templates_dir/template_name` tree into `project_dir`
///
/// Returns the number of files copied.
pub async fn copy_template(
    templates_dir: &Path,
    template_name: &str,
    project_dir: &Path,
) -> Result<usize, ScaffoldError> {
    let source = templates_dir.join(template_name);
    copy_tree(&source, project_dir).await
}

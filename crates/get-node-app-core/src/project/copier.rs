//! Recursive template tree copying

use crate::error::ScaffoldError;
use std::io;
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Copy every directory and file under `source` into `target`
///
/// `target` must already exist. File contents are copied byte for byte and
/// the directory structure is preserved, including empty directories.
pub async fn copy_tree(source: &Path, target: &Path) -> Result<usize, ScaffoldError> {
    if !source.is_dir() {
        return Err(ScaffoldError::filesystem(
            &io::Error::from(io::ErrorKind::NotFound),
            format!("Template not found at {}", source.display()),
        ));
    }

    let mut copied = 0;

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry.map_err(|e| {
            let io_err = e
                .into_io_error()
                .unwrap_or_else(|| io::Error::other("filesystem loop"));
            ScaffoldError::filesystem(&io_err, format!("Failed to read {}", source.display()))
        })?;
        let relative = entry.path().strip_prefix(source).unwrap_or(entry.path());
        let target_path = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target_path).await.map_err(|e| {
                ScaffoldError::filesystem(
                    &e,
                    format!("Failed to create directory: {}", target_path.display()),
                )
            })?;
            continue;
        }

        // Ensure parent directories exist
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                ScaffoldError::filesystem(
                    &e,
                    format!("Failed to create directory: {}", parent.display()),
                )
            })?;
        }

        fs::copy(entry.path(), &target_path).await.map_err(|e| {
            ScaffoldError::filesystem(
                &e,
                format!("Failed to copy file: {}", target_path.display()),
            )
        })?;
        copied += 1;
    }

    Ok(copied)
}

//! Zip packing and extraction for template trees
//!
//! Archives hold one template each, with every entry prefixed by
//! `{template_name}/`. Remote catalogs serve these prebuilt; local catalogs
//! pack them on the fly so both sources take the same extraction path.

use crate::error::ScaffoldError;
use std::fs;
use std::io::{self, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

fn zip_error(err: ZipError, template_name: &str) -> ScaffoldError {
    match err {
        ZipError::Io(e) => ScaffoldError::filesystem(
            &e,
            format!("Failed to process archive for template '{}'", template_name),
        ),
        other => ScaffoldError::Filesystem {
            code: None,
            message: format!(
                "Invalid archive for template '{}': {}",
                template_name, other
            ),
        },
    }
}

/// Pack `template_dir/template_name` into an in-memory zip
pub fn build_zip(template_dir: &Path, template_name: &str) -> Result<Vec<u8>, ScaffoldError> {
    let template_path = template_dir.join(template_name);
    if !template_path.is_dir() {
        return Err(ScaffoldError::filesystem(
            &io::Error::from(io::ErrorKind::NotFound),
            format!("Template directory not found: {}", template_path.display()),
        ));
    }

    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for entry in WalkDir::new(&template_path).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let io_err = io::Error::other(e.to_string());
                ScaffoldError::filesystem(
                    &io_err,
                    format!("Failed to read {}", template_path.display()),
                )
            })?;
            let relative = entry
                .path()
                .strip_prefix(&template_path)
                .unwrap_or(entry.path());
            let zip_path = format!(
                "{}/{}",
                template_name,
                relative.to_string_lossy().replace('\\', "/")
            );

            if entry.file_type().is_dir() {
                zip.add_directory(zip_path.as_str(), options)
                    .map_err(|e| zip_error(e, template_name))?;
            } else {
                let content = fs::read(entry.path()).map_err(|e| {
                    ScaffoldError::filesystem(
                        &e,
                        format!("Failed to read {}", entry.path().display()),
                    )
                })?;
                zip.start_file(zip_path.as_str(), options)
                    .map_err(|e| zip_error(e, template_name))?;
                zip.write_all(&content).map_err(|e| {
                    ScaffoldError::filesystem(&e, format!("Failed to pack {}", zip_path))
                })?;
            }
        }

        zip.finish().map_err(|e| zip_error(e, template_name))?;
    }

    Ok(zip_buffer)
}

/// Extract a template archive into `dest`, replacing whatever was there
///
/// Returns the number of files written.
pub fn extract_zip(
    zip_bytes: &[u8],
    template_name: &str,
    dest: &Path,
) -> Result<usize, ScaffoldError> {
    let mut archive =
        ZipArchive::new(Cursor::new(zip_bytes)).map_err(|e| zip_error(e, template_name))?;

    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|e| {
            ScaffoldError::filesystem(
                &e,
                format!("Failed to clear cached template {}", dest.display()),
            )
        })?;
    }
    fs::create_dir_all(dest).map_err(|e| {
        ScaffoldError::filesystem(&e, format!("Failed to create {}", dest.display()))
    })?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| zip_error(e, template_name))?;

        let enclosed: PathBuf = file.enclosed_name().ok_or_else(|| ScaffoldError::Filesystem {
            code: Some("EINVAL".to_string()),
            message: format!(
                "Archive entry '{}' escapes the template directory",
                file.name()
            ),
        })?;

        // Strip the template_name prefix from the path
        let relative = enclosed
            .strip_prefix(template_name)
            .map(Path::to_path_buf)
            .unwrap_or(enclosed);
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(&relative);

        if file.is_dir() {
            fs::create_dir_all(&target).map_err(|e| {
                ScaffoldError::filesystem(&e, format!("Failed to create {}", target.display()))
            })?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ScaffoldError::filesystem(&e, format!("Failed to create {}", parent.display()))
            })?;
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| {
            ScaffoldError::filesystem(&e, format!("Failed to read archive entry {}", file.name()))
        })?;
        fs::write(&target, &contents).map_err(|e| {
            ScaffoldError::filesystem(&e, format!("Failed to write {}", target.display()))
        })?;
        written += 1;
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn write_template(root: &Path) {
        let t = root.join("node-express");
        fs::create_dir_all(t.join("src/routes")).unwrap();
        fs::write(t.join("package.json"), b"{\"name\":\"app\"}").unwrap();
        fs::write(t.join("src/index.js"), b"console.log('hi')\n").unwrap();
        fs::write(t.join("src/routes/api.js"), [0u8, 159, 146, 150]).unwrap();
        fs::create_dir_all(t.join("public")).unwrap();
    }

    #[test]
    fn test_pack_and_extract_strips_prefix() {
        let src = tempfile::tempdir().unwrap();
        write_template(src.path());

        let bytes = build_zip(src.path(), "node-express").unwrap();

        let cache = tempfile::tempdir().unwrap();
        let dest = cache.path().join("node-express");
        let written = extract_zip(&bytes, "node-express", &dest).unwrap();

        assert_eq!(written, 3);
        assert_eq!(fs::read(dest.join("src/routes/api.js")).unwrap(), vec![0u8, 159, 146, 150]);
        assert!(dest.join("public").is_dir());
        assert!(!dest.join("node-express").exists());
    }

    #[test]
    fn test_extract_replaces_previous_cache() {
        let src = tempfile::tempdir().unwrap();
        write_template(src.path());
        let bytes = build_zip(src.path(), "node-express").unwrap();

        let cache = tempfile::tempdir().unwrap();
        let dest = cache.path().join("node-express");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale.txt"), b"old").unwrap();

        extract_zip(&bytes, "node-express", &dest).unwrap();

        assert!(!dest.join("stale.txt").exists());
        assert!(dest.join("package.json").exists());
    }

    #[test]
    fn test_missing_template_dir() {
        let src = tempfile::tempdir().unwrap();
        let err = build_zip(src.path(), "nope").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Filesystem);
        assert_eq!(err.field(crate::error::Field::Code).as_deref(), Some("ENOENT"));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let cache = tempfile::tempdir().unwrap();
        let err = extract_zip(b"not a zip", "x", &cache.path().join("x")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Filesystem);
    }
}

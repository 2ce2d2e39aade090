//! Runs the package manager's install command in the project directory

use crate::env::PackageManager;
use crate::error::ScaffoldError;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// Installs dependencies for a new project
#[async_trait]
pub trait SetupRunner: Send + Sync {
    async fn setup(
        &self,
        package_manager: PackageManager,
        project_dir: &Path,
    ) -> Result<(), ScaffoldError>;
}

/// Spawns the real package manager
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallRunner;

#[async_trait]
impl SetupRunner for InstallRunner {
    async fn setup(
        &self,
        package_manager: PackageManager,
        project_dir: &Path,
    ) -> Result<(), ScaffoldError> {
        run_install(
            package_manager.program(),
            package_manager.install_args(),
            project_dir,
        )
        .await
    }
}

/// Run `program args..` in `dir`, capturing its output
///
/// A non-zero exit becomes [`ScaffoldError::Setup`] whose short message names
/// the command and ends with the last line the process wrote to stderr.
pub async fn run_install(program: &str, args: &[&str], dir: &Path) -> Result<(), ScaffoldError> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");

    let output = TokioCommand::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ScaffoldError::Setup {
            exit_code: -1,
            short_message: format!("Command failed to start: {}: {}", command, e),
        })?;

    if output.status.success() {
        return Ok(());
    }

    let exit_code = output.status.code().unwrap_or(-1);
    let mut short_message = format!("Command failed with exit code {}: {}", exit_code, command);

    let stderr = String::from_utf8_lossy(&output.stderr);
    if let Some(last) = stderr.lines().rev().map(str::trim).find(|l| !l.is_empty()) {
        short_message.push('\n');
        short_message.push_str(last);
    }

    Err(ScaffoldError::Setup {
        exit_code,
        short_message,
    })
}

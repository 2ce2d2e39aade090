//! Runtime and package manager detection

use crate::error::ScaffoldError;
use std::fmt;
use std::process::Command;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Yarn,
    Pnpm,
    Npm,
}

impl PackageManager {
    /// Preference order used when several are installed
    pub const PREFERENCE: [PackageManager; 3] =
        [PackageManager::Yarn, PackageManager::Pnpm, PackageManager::Npm];

    /// Name of the executable
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Npm => "npm",
        }
    }

    /// Arguments that install a project's dependencies
    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    /// Human-readable install command
    pub fn install_command(&self) -> String {
        format!("{} {}", self.program(), self.install_args().join(" "))
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Detection result for a host tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Lookup of host executables
pub trait HostCommands {
    /// Version reported by `<program> --version`, or `None` if it can't run
    fn version(&self, program: &str) -> Option<String>;
}

/// Runs the real executables found on `PATH`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommands;

impl HostCommands for SystemCommands {
    fn version(&self, program: &str) -> Option<String> {
        let output = Command::new(program).arg("--version").output().ok()?;
        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            None
        }
    }
}

fn check_tool<H: HostCommands + ?Sized>(host: &H, program: &str, name: &'static str) -> ToolInfo {
    match host.version(program) {
        Some(version) => ToolInfo {
            name,
            version: Some(version),
            available: true,
        },
        None => ToolInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check that Node.js is installed, then pick the first usable package manager
pub fn probe_with<H: HostCommands + ?Sized>(
    host: &H,
) -> Result<(PackageManager, ToolInfo), ScaffoldError> {
    let node = check_tool(host, "node", "Node.js");
    if !node.available {
        return Err(ScaffoldError::environment(
            "Node.js is not installed (install from https://nodejs.org)",
        ));
    }

    for pm in PackageManager::PREFERENCE {
        let info = check_tool(host, pm.program(), pm.program());
        if info.available {
            return Ok((pm, info));
        }
    }

    let names: Vec<&str> = PackageManager::PREFERENCE
        .iter()
        .map(|pm| pm.program())
        .collect();
    Err(ScaffoldError::environment(format!(
        "No supported package manager found (looked for {})",
        names.join(", ")
    )))
}

/// Capability used by the pipeline's probing stage
pub trait EnvironmentProbe {
    fn probe(&self) -> Result<(PackageManager, ToolInfo), ScaffoldError>;
}

/// Probe backed by a [`HostCommands`] implementation
#[derive(Debug, Clone, Default)]
pub struct SystemProbe<H = SystemCommands> {
    host: H,
}

impl<H: HostCommands> SystemProbe<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: HostCommands> EnvironmentProbe for SystemProbe<H> {
    fn probe(&self) -> Result<(PackageManager, ToolInfo), ScaffoldError> {
        probe_with(&self.host)
    }
}

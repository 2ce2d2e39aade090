//! Host environment detection
//!
//! This module provides:
//! - Node.js runtime detection
//! - Package manager detection in a fixed preference order

pub mod probe;

pub use probe::{
    probe_with, EnvironmentProbe, HostCommands, PackageManager, SystemCommands,
    SystemProbe, ToolInfo,
};

//! CLI prompts and progress output using cliclack (Charm-style inline prompts)
//!
//! This module is optional and only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod feedback;
#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use feedback::{banner, CliFeedback};
#[cfg(feature = "tui")]
pub use prompts::CliSelector;

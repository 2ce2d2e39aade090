//! get-node-app core - interactive scaffolding of Node.js projects
//!
//! The binary wires production collaborators into a [`Pipeline`]:
//!
//! - **Environment** - Node.js and package manager detection
//! - **Templates** - catalog listing and download into the local cache
//! - **Selection** - template choice and project name entry
//! - **Project** - directory creation and template copying
//! - **Setup** - package manager install inside the new project
//! - **Pipeline** - ordered stages, progress feedback, session log, halting
//!
//! # Feature Flags
//!
//! - `tui` (default): cliclack-based selector and terminal feedback
//!
//! # Example Usage
//!
//! ```ignore
//! use get_node_app_core::{pipeline::*, env::SystemProbe, setup::InstallRunner};
//!
//! let outcome = Pipeline::new(collaborators, options).run().await;
//! std::process::exit(outcome.exit_code().into());
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod logging;
pub mod phrases;
pub mod pipeline;
pub mod project;
pub mod select;
pub mod session;
pub mod setup;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::AppConfig;
pub use env::PackageManager;
pub use error::{ErrorKind, ScaffoldError};
pub use pipeline::{Collaborators, Outcome, Pipeline, PipelineOptions, Stage};
pub use select::{Answers, Selector};
pub use session::{ProjectName, Session};
pub use templates::{HttpCatalog, TemplateCatalog, TemplateDescriptor};

//! Package manager setup inside a freshly materialized project

pub mod runner;

pub use runner::{run_install, InstallRunner, SetupRunner};

//! Template catalog access
//!
//! This module provides:
//! - The catalog manifest format (`template.yaml`)
//! - The [`TemplateCatalog`] capability and its HTTP/local implementation
//! - Zip packing and extraction shared by both sources

pub mod archive;
pub mod catalog;
pub mod manifest;

pub use catalog::{HttpCatalog, TemplateCatalog, TemplateDescriptor, TemplateSource};
pub use manifest::RootManifest;

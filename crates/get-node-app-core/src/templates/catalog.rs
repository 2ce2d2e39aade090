//! Template catalog from a remote URL or a local directory
//!
//! Both sources go through zip archives:
//! - Remote: fetches `{base}/template.yaml` and prebuilt `{base}/{name}.zip`
//! - Local: reads `template.yaml` and packs `{dir}/{name}` into a zip
//!
//! The downloaded archive is extracted into the template cache at
//! `{templates_dir}/{name}`.

use super::archive;
use super::manifest::RootManifest;
use crate::error::{io_error_code, ScaffoldError};
use crate::project::is_plain_name;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::error::Error as _;
use std::path::{Path, PathBuf};
use tokio::fs;
use url::Url;

/// A template as listed by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescriptor {
    pub name: String,
    /// Archive name relative to the catalog base
    pub source_ref: String,
}

impl TemplateDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let source_ref = format!("{}.zip", name);
        Self { name, source_ref }
    }
}

/// Listing and retrieval of templates
#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// Available templates, in catalog order
    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, ScaffoldError>;

    /// Fetch `template` into `dest_dir/{name}`, overwriting any previous copy
    async fn download(
        &self,
        dest_dir: &Path,
        template: &TemplateDescriptor,
    ) -> Result<(), ScaffoldError>;
}

/// Template source - either remote URL or local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Parse a catalog location; `file://` URLs select a local directory
    pub fn parse(location: &str) -> Result<Self> {
        let url =
            Url::parse(location).with_context(|| format!("Invalid template URL: {}", location))?;
        if url.scheme() == "file" {
            let path = url
                .to_file_path()
                .map_err(|_| anyhow::anyhow!("Invalid template directory: {}", location))?;
            return Ok(Self::Local(path));
        }
        Ok(Self::Remote(url))
    }
}

/// Catalog client over HTTP(S) or a local directory
pub struct HttpCatalog {
    source: TemplateSource,
    client: reqwest::Client,
}

impl HttpCatalog {
    /// Create a new catalog client with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url, ScaffoldError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ScaffoldError::network(format!("URL cannot have path segments: {}", base))
            })?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, ScaffoldError> {
        let syscall = format!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&e, &syscall))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScaffoldError::Network {
                code: Some(status.as_u16().to_string()),
                syscall: Some(syscall),
                message: format!("Failed to fetch {}: HTTP {}", url, status),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(&e, &syscall))?;
        Ok(bytes.to_vec())
    }
}

/// Classify a reqwest failure into a network error with transport detail
fn transport_error(err: &reqwest::Error, syscall: &str) -> ScaffoldError {
    let code = if let Some(status) = err.status() {
        Some(status.as_u16().to_string())
    } else if err.is_timeout() {
        Some("ETIMEDOUT".to_string())
    } else if err.is_connect() {
        Some(
            io_source(err)
                .map(io_error_code)
                .unwrap_or_else(|| "ECONNREFUSED".to_string()),
        )
    } else {
        io_source(err).map(io_error_code)
    };

    ScaffoldError::Network {
        code,
        syscall: Some(syscall.to_string()),
        message: error_chain(err),
    }
}

fn io_source(err: &reqwest::Error) -> Option<&std::io::Error> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
            return Some(io_err);
        }
        source = cause.source();
    }
    None
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl TemplateCatalog for HttpCatalog {
    async fn list_templates(&self) -> Result<Vec<TemplateDescriptor>, ScaffoldError> {
        let content = match &self.source {
            TemplateSource::Remote(base_url) => {
                let url = Self::build_url(base_url, "template.yaml")?;
                let bytes = self.get_bytes(url).await?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
            TemplateSource::Local(path) => {
                let manifest_path = path.join("template.yaml");
                fs::read_to_string(&manifest_path).await.map_err(|e| {
                    ScaffoldError::filesystem(
                        &e,
                        format!("Failed to read {}", manifest_path.display()),
                    )
                })?
            }
        };

        let manifest = RootManifest::parse(&content).map_err(|e| {
            ScaffoldError::network(format!("Failed to parse template catalog: {}", e))
        })?;

        manifest
            .templates
            .into_iter()
            .map(|name| {
                if !is_plain_name(&name) {
                    return Err(ScaffoldError::network(format!(
                        "Invalid template name in catalog: {:?}",
                        name
                    )));
                }
                Ok(TemplateDescriptor::new(name))
            })
            .collect()
    }

    async fn download(
        &self,
        dest_dir: &Path,
        template: &TemplateDescriptor,
    ) -> Result<(), ScaffoldError> {
        // The cached copy is replaced wholesale, so it must sit directly under dest_dir
        if !is_plain_name(&template.name) {
            return Err(ScaffoldError::Filesystem {
                code: Some("EINVAL".to_string()),
                message: format!("Refusing to cache template {:?}", template.name),
            });
        }

        let zip_bytes = match &self.source {
            TemplateSource::Remote(base_url) => {
                let url = Self::build_url(base_url, &template.source_ref)?;
                self.get_bytes(url).await?
            }
            TemplateSource::Local(path) => archive::build_zip(path, &template.name)?,
        };

        let target = dest_dir.join(&template.name);
        archive::extract_zip(&zip_bytes, &template.name, &target)?;
        Ok(())
    }
}

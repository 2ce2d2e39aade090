//! Startup configuration read from the environment
//!
//! Only two knobs exist: where the template catalog lives and where the
//! per-user data directory (logs and template cache) is rooted.

use crate::templates::TemplateSource;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Application directory name under the user data root
pub const APP_NAME: &str = "get-node-app";

/// Default template catalog
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://raw.githubusercontent.com/DarthCucumber/get-node-app-templates/main";

/// Browsable catalog repository, shown after listing
pub const TEMPLATES_REPO_URL: &str = "https://github.com/DarthCucumber/get-node-app-templates";

/// Environment variable overriding the catalog URL
pub const TEMPLATE_URL_ENV: &str = "GET_NODE_APP_TEMPLATE_URL";

/// Environment variable overriding the data root
pub const HOME_ENV: &str = "GET_NODE_APP_HOME";

/// Resolved startup configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub template_source: TemplateSource,
    pub data_root: PathBuf,
    pub user_agent: String,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env(cli_version: &str) -> Result<Self> {
        Self::from_lookup(cli_version, |key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(cli_version: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(TEMPLATE_URL_ENV).unwrap_or_else(|| DEFAULT_TEMPLATE_URL.to_string());
        let template_source = TemplateSource::parse(&url)?;

        let data_root = match lookup(HOME_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => dirs::data_dir()
                .context("Could not determine the user data directory")?
                .join(APP_NAME),
        };

        Ok(Self {
            template_source,
            data_root,
            user_agent: format!("{}/{}", APP_NAME, cli_version),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = AppConfig::from_lookup(
            "0.1.0",
            lookup_from(&[
                (TEMPLATE_URL_ENV, "https://example.com/templates"),
                (HOME_ENV, "/tmp/gna-home"),
            ]),
        )
        .unwrap();

        assert_eq!(config.data_root, PathBuf::from("/tmp/gna-home"));
        assert_eq!(config.user_agent, "get-node-app/0.1.0");
        match config.template_source {
            TemplateSource::Remote(url) => assert_eq!(url.host_str(), Some("example.com")),
            other => panic!("expected remote source, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_template_url_is_rejected() {
        let result = AppConfig::from_lookup(
            "0.1.0",
            lookup_from(&[(TEMPLATE_URL_ENV, "not a url"), (HOME_ENV, "/tmp/x")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_default_template_url_is_remote() {
        let config =
            AppConfig::from_lookup("0.1.0", lookup_from(&[(HOME_ENV, "/tmp/x")])).unwrap();
        assert!(matches!(config.template_source, TemplateSource::Remote(_)));
    }
}

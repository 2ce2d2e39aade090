//! Catalog manifest types and parsing

use serde::{Deserialize, Serialize};

/// Root manifest at the catalog base (`template.yaml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootManifest {
    /// Template names, in display order
    #[serde(default)]
    pub templates: Vec<String>,
}

impl RootManifest {
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

/// Settings from `config.toml`. Every field has a flag-level override, so a
/// missing file just means defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Remote catalog location; sharing links are rewritten before fetching.
    pub url: Option<String>,
    /// Local catalog CSV, used when no URL is set.
    pub file: Option<String>,
    /// Where fetched catalog bytes are cached between runs.
    pub cache_dir: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            cache_dir: "cache".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

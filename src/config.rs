// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SdnError};
use crate::fetcher::SDN_URL;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub release: ReleaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub registry_url: String,
    pub remote: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { url: SDN_URL.to_string() }
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            registry_url: "https://crates.io".to_string(),
            remote: "origin".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            release: ReleaseConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from an optional TOML file plus environment
    /// overrides (`OFAC_ADDRESSES__SOURCE__URL` and friends). Missing
    /// sections and fields fall back to defaults; a malformed value is an
    /// error, not a silent reset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("OFAC_ADDRESSES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SdnError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| SdnError::Config(e.to_string()))
    }

    pub fn default_config() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default_config();
        assert_eq!(config.source.url, SDN_URL);
        assert_eq!(config.release.registry_url, "https://crates.io");
        assert_eq!(config.release.remote, "origin");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.release.registry_url, "https://crates.io");
    }

    #[test]
    fn test_partial_section_keeps_siblings_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[release]\nremote = \"upstream\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.release.remote, "upstream");
        assert_eq!(config.release.registry_url, "https://crates.io");
    }

    #[test]
    fn test_malformed_section_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[release]\nremote = \"upstream\"\nregistry_url = { nested = 1 }\n",
        )
        .unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, SdnError::Config(_)));
    }

    #[test]
    fn test_env_override_uses_double_underscore_prefix() {
        unsafe { std::env::set_var("OFAC_ADDRESSES__SOURCE__URL", "http://localhost:9/sdn.xml") };
        let config = Config::load(None).unwrap();
        unsafe { std::env::remove_var("OFAC_ADDRESSES__SOURCE__URL") };

        assert_eq!(config.source.url, "http://localhost:9/sdn.xml");
    }
}

//! Configuration management for chapview.
//!
//! Loads configuration from `${CHAPVIEW_HOME}/config.toml` with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::viewer::Variant;

/// Environment variable holding the Chaparral API key.
pub const API_KEY_ENV: &str = "CHAPARRAL_API_KEY";

/// Environment variable overriding `api_base_url`.
pub const BASE_URL_ENV: &str = "CHAPARRAL_BASE_URL";

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for chapview configuration and log directories.
    //!
    //! CHAPVIEW_HOME resolution order:
    //! 1. CHAPVIEW_HOME environment variable (if set)
    //! 2. ~/.config/chapview (default)

    use std::path::PathBuf;

    /// Returns the chapview home directory.
    pub fn chapview_home() -> PathBuf {
        if let Ok(home) = std::env::var("CHAPVIEW_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".chapview"),
            |h| h.join(".config").join("chapview"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        chapview_home().join("config.toml")
    }

    /// Returns the directory the dashboard writes its log file to.
    pub fn logs_dir() -> PathBuf {
        chapview_home().join("logs")
    }
}

fn default_api_base_url() -> String {
    Config::DEFAULT_API_BASE_URL.to_string()
}

fn default_viewer_url() -> String {
    Config::DEFAULT_VIEWER_URL.to_string()
}

fn default_page_size() -> u32 {
    Config::DEFAULT_PROTEIN_PAGE_SIZE
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Chaparral REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL of the external structure viewer.
    #[serde(default = "default_viewer_url")]
    pub viewer_url: String,

    /// Dashboard variant used when `--variant` is not given.
    pub variant: Variant,

    /// Number of proteins requested per page when listing proteins.
    #[serde(default = "default_page_size")]
    pub protein_page_size: u32,

    /// HTTP request timeout in seconds (unset leaves the client default).
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub const DEFAULT_API_BASE_URL: &str = "https://api.us-west.chaparral.ai";
    pub const DEFAULT_VIEWER_URL: &str = "https://pdb-coverage.streamlit.app/";
    const DEFAULT_PROTEIN_PAGE_SIZE: u32 = 500;

    /// Loads configuration from the default config path and applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV)
            && !base_url.trim().is_empty()
        {
            self.api_base_url = base_url.trim().to_string();
        }
    }

    /// Returns the configured request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            Some(0) | None => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Page size for protein listings (never zero).
    pub fn protein_page_size(&self) -> u32 {
        self.protein_page_size.max(1)
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            viewer_url: Self::DEFAULT_VIEWER_URL.to_string(),
            variant: Variant::default(),
            protein_page_size: Self::DEFAULT_PROTEIN_PAGE_SIZE,
            request_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "variant = \"redundant_peptides\"\nprotein_page_size = 50\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.variant, Variant::RedundantPeptides);
        assert_eq!(config.protein_page_size, 50);
        assert_eq!(config.api_base_url, Config::DEFAULT_API_BASE_URL);
        assert_eq!(config.viewer_url, Config::DEFAULT_VIEWER_URL);
    }

    #[test]
    fn test_invalid_variant_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "variant = \"everything\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config: Config = toml::from_str(default_config_template()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::init(&path).unwrap();
        assert!(path.exists());
        assert!(Config::init(&path).is_err());
    }

    #[test]
    fn test_zero_timeout_means_unset() {
        let config = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), None);

        let config = Config {
            request_timeout_secs: Some(30),
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }
}

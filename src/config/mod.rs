//! Configuration management for `octo-seo.toml`.
//!
//! # Sections
//!
//! | Section   | Purpose                                           |
//! |-----------|---------------------------------------------------|
//! | `[site]`  | Site name, tagline, URL, language, logo           |
//! | `[store]` | Location of the `site.json` host snapshot         |
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Example"
//! description = "Just another site"
//! url = "https://example.com"
//! language = "en-US"
//! logo = "https://example.com/logo.png"
//!
//! [store]
//! path = "site.json"
//! ```

mod error;
mod site;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use site::SiteInfoConfig;

use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing octo-seo.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site information
    pub site: SiteInfoConfig,

    /// Host snapshot location
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to `site.json`, relative to the config file.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "site.json".into(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from `config_name`, searching upward from cwd.
    ///
    /// `data` overrides `store.path`; relative paths resolve against the
    /// current directory, like any CLI argument.
    pub fn load(config_name: &Path, data: Option<&Path>) -> Result<Self> {
        let config_path = find_config_file(config_name).with_context(|| {
            format!(
                "Config file '{}' not found in this or any parent directory",
                config_name.display()
            )
        })?;

        let mut config = Self::from_path(&config_path)?;
        config.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.store.path = match data {
            Some(path) => std::env::current_dir()
                .context("Failed to get current working directory")?
                .join(path),
            None => config.root.join(&config.store.path),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            log!("warning"; "unknown fields in {}, ignoring:", path.display());
            for field in &ignored {
                eprintln!("- {field}");
            }
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Validate configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();
        self.site.validate(&mut diag);
        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Find config file by searching upward from current directory
///
/// ```text
/// /home/user/site/content/    ← cwd
/// /home/user/site/octo-seo.toml  ← found!
/// ```
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }
        current = current.parent()?;
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "[site]\ntitle = \"Example\"\nurl = \"https://example.com\"\n";

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(SiteConfig::from_str("[site\ntitle = \"x\"").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.store.path, PathBuf::from("site.json"));
        assert_eq!(config.site.language, "en-US");
        assert!(config.site.logo.is_none());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = format!("{VALID}[unknown_section]\nfield = \"value\"");
        let (config, ignored) = SiteConfig::parse_with_ignored(&content).unwrap();
        assert_eq!(config.site.title, "Example");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let (_, ignored) = SiteConfig::parse_with_ignored(VALID).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_load_resolves_store_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("octo-seo.toml");
        fs::write(&path, format!("{VALID}[store]\npath = \"data/site.json\"\n")).unwrap();

        let config = SiteConfig::load(&path, None).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.store.path, dir.path().join("data/site.json"));
    }

    #[test]
    fn test_load_rejects_invalid_site() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("octo-seo.toml");
        fs::write(&path, "[site]\nurl = \"ftp://example.com\"\n").unwrap();

        let err = SiteConfig::load(&path, None).unwrap_err();
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(&dir.path().join("absent.toml"), None).is_err());
    }
}

//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use pe_core::RateCard;

/// Default model for AI estimates.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Claude API key for AI estimates.
    pub api_key: Option<String>,

    /// Model requested for AI estimates.
    pub model: String,

    /// The rate card estimates are priced from. Partial overrides merge
    /// with the built-in defaults.
    pub rates: RateCard,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            rates: RateCard::default(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PE_*)
        figment = figment.merge(Env::prefixed("PE_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for pe.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pe"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_config_path_ends_with_pe() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "pe");
    }

    #[test]
    fn test_default_config_has_no_api_key() {
        assert_eq!(Config::default().api_key, None);
    }

    #[test]
    fn test_default_config_uses_builtin_rates() {
        let config = Config::default();
        assert_eq!(config.rates, RateCard::default());
    }

    #[test]
    fn test_default_model_is_claude() {
        assert!(Config::default().model.starts_with("claude"));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            api_key: Some("sk-ant-secret".to_string()),
            ..Config::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}

//! Configuration loading for the blit tools.
//!
//! Layered config: defaults -> config file -> `--config` file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/blit/config.toml.

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::BlitError;

/// How search queries are matched against index keys.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchModeSetting {
    /// Query must be a prefix of the key term (the documentation widget's behaviour)
    #[default]
    Prefix,
    /// Query may appear anywhere in the key term
    Substring,
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Maximum number of hits returned by a query
    #[serde(default = "default_search_limit")]
    pub limit: usize,

    /// Default match mode
    #[serde(default)]
    pub match_mode: MatchModeSetting,
}

fn default_search_limit() -> usize {
    50
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            limit: default_search_limit(),
            match_mode: MatchModeSetting::default(),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Search data file or directory of `all_*.js` files
    #[serde(default = "default_index_path")]
    pub index_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Search configuration
    #[serde(default)]
    pub search: SearchSettings,
}

fn default_index_path() -> String {
    "./search".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            log_level: default_log_level(),
            search: SearchSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/blit/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (BLIT_INDEX_PATH, BLIT_SEARCH__LIMIT, ...)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, BlitError> {
        let config_dir = ProjectDirs::from("", "", "blit")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("index_path", default_index_path())
            .map_err(|e| BlitError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| BlitError::Config(e.to_string()))?
            .set_default("search.limit", default_search_limit() as i64)
            .map_err(|e| BlitError::Config(e.to_string()))?
            .set_default("search.match_mode", "prefix")
            .map_err(|e| BlitError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Nested keys use a double underscore: BLIT_SEARCH__MATCH_MODE=substring
        builder = builder.add_source(
            Environment::with_prefix("BLIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| BlitError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| BlitError::Config(e.to_string()))?;
        settings.validate().map_err(BlitError::Config)?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.search.limit == 0 {
            return Err("search.limit must be > 0".to_string());
        }
        if self.index_path.trim().is_empty() {
            return Err("index_path must not be empty".to_string());
        }
        Ok(())
    }

    /// Expand a leading `~/` in index_path to the home directory
    pub fn expanded_index_path(&self) -> PathBuf {
        if let Some(rest) = self.index_path.strip_prefix("~/") {
            if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
                return home.join(rest);
            }
        }
        PathBuf::from(&self.index_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.index_path, "./search");
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.search.limit, 50);
        assert_eq!(settings.search.match_mode, MatchModeSetting::Prefix);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "index_path = \"/docs/search\"\n\n[search]\nlimit = 7\nmatch_mode = \"substring\""
        )
        .unwrap();

        let settings = Settings::load(Some(&file.path().to_string_lossy())).unwrap();
        assert_eq!(settings.index_path, "/docs/search");
        assert_eq!(settings.search.limit, 7);
        assert_eq!(settings.search.match_mode, MatchModeSetting::Substring);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[search]\nlimit = 9\nmatch_mode = \"prefix\"").unwrap();

        std::env::set_var("BLIT_SEARCH__MATCH_MODE", "substring");
        let result = Settings::load(Some(&file.path().to_string_lossy()));
        std::env::remove_var("BLIT_SEARCH__MATCH_MODE");

        let settings = result.unwrap();
        assert_eq!(settings.search.match_mode, MatchModeSetting::Substring);
        assert_eq!(settings.search.limit, 9);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Settings::load(Some("/nonexistent/blit/config.toml"));
        assert!(matches!(result, Err(BlitError::Config(_))));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let mut settings = Settings::default();
        settings.search.limit = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_expanded_index_path_passthrough() {
        let settings = Settings {
            index_path: "/abs/search".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.expanded_index_path(), PathBuf::from("/abs/search"));
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"match_mode\":\"prefix\""));
        let decoded: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.search.limit, 50);
    }
}

//! Configuration loading for the search service
//!
//! Every setting resolves in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result, SortKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Videos per result page
pub const DEFAULT_PAGE_SIZE: i64 = 42;
/// Maximum videos returned by the unpaginated listing
pub const DEFAULT_UNPAGINATED_CAP: i64 = 500;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5730";
/// SQLite busy timeout applied to every read connection
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_DATABASE_FILE: &str = "sqlite.db";

pub const ENV_DATABASE_PATH: &str = "TVS_DATABASE_PATH";
pub const ENV_BIND_ADDRESS: &str = "TVS_BIND_ADDRESS";
pub const ENV_PAGE_SIZE: &str = "TVS_PAGE_SIZE";
pub const ENV_SORT: &str = "TVS_SORT";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
    pub unpaginated_cap: Option<i64>,
    pub busy_timeout_ms: Option<u64>,
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub page_size: i64,
    pub sort: SortKey,
    pub unpaginated_cap: i64,
    pub busy_timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortKey::default(),
            unpaginated_cap: DEFAULT_UNPAGINATED_CAP,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl SearchConfig {
    /// Resolve configuration from CLI overrides, environment, TOML file and defaults
    ///
    /// An explicit `--config` file that cannot be read is an error. A missing
    /// file at the default location only logs a warning.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let toml_config = match &overrides.config_file {
            Some(path) => Some(load_toml_config(path)?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(load_toml_config(&path)?),
                Some(path) => {
                    warn!(
                        "No config file at {} - using environment and defaults",
                        path.display()
                    );
                    None
                }
                None => None,
            },
        };

        Self::from_sources(overrides, toml_config.as_ref())
    }

    /// Merge already-loaded sources; used by [`SearchConfig::resolve`] and tests
    pub fn from_sources(overrides: &ConfigOverrides, toml: Option<&TomlConfig>) -> Result<Self> {
        let defaults = SearchConfig::default();

        let database_path = overrides
            .database_path
            .clone()
            .or_else(|| env_var(ENV_DATABASE_PATH).map(PathBuf::from))
            .or_else(|| toml.and_then(|t| t.database_path.clone()))
            .unwrap_or(defaults.database_path);

        let bind_address = overrides
            .bind_address
            .clone()
            .or_else(|| env_var(ENV_BIND_ADDRESS))
            .or_else(|| toml.and_then(|t| t.bind_address.clone()))
            .unwrap_or(defaults.bind_address);

        let page_size = match overrides.page_size {
            Some(size) => size,
            None => match env_var(ENV_PAGE_SIZE) {
                Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                    Error::Config(format!("{} must be an integer, got {:?}", ENV_PAGE_SIZE, raw))
                })?,
                None => toml
                    .and_then(|t| t.page_size)
                    .unwrap_or(defaults.page_size),
            },
        };

        let sort = match overrides
            .sort
            .clone()
            .or_else(|| env_var(ENV_SORT))
            .or_else(|| toml.and_then(|t| t.sort.clone()))
        {
            Some(raw) => raw
                .parse::<SortKey>()
                .map_err(|e| Error::Config(e.to_string()))?,
            None => defaults.sort,
        };

        let config = SearchConfig {
            database_path,
            bind_address,
            page_size,
            sort,
            unpaginated_cap: toml
                .and_then(|t| t.unpaginated_cap)
                .unwrap_or(defaults.unpaginated_cap),
            busy_timeout_ms: toml
                .and_then(|t| t.busy_timeout_ms)
                .unwrap_or(defaults.busy_timeout_ms),
        };

        config.validate()?;
        info!(
            "Resolved configuration: database={}, page_size={}, sort={}",
            config.database_path.display(),
            config.page_size,
            config.sort
        );
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size < 1 {
            return Err(Error::Config(format!(
                "page_size must be at least 1, got {}",
                self.page_size
            )));
        }
        if self.unpaginated_cap < 1 {
            return Err(Error::Config(format!(
                "unpaginated_cap must be at least 1, got {}",
                self.unpaginated_cap
            )));
        }
        if self.bind_address.trim().is_empty() {
            return Err(Error::Config("bind_address must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
}

/// Write a TOML config file, creating parent directories
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Cannot serialize config: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// `~/.config/tango-video-search/config.toml` (platform equivalent elsewhere)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tango-video-search").join("config.toml"))
}

/// OS-dependent default database location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tango-video-search"))
        .unwrap_or_else(|| PathBuf::from("./data"))
        .join(DEFAULT_DATABASE_FILE)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for name in [ENV_DATABASE_PATH, ENV_BIND_ADDRESS, ENV_PAGE_SIZE, ENV_SORT] {
            std::env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_any_source() {
        clear_env();
        let config = SearchConfig::from_sources(&ConfigOverrides::default(), None).unwrap();

        assert_eq!(config.page_size, 42);
        assert_eq!(config.sort, SortKey::PublishedAt);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.unpaginated_cap, DEFAULT_UNPAGINATED_CAP);
        assert_eq!(config.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert!(config.database_path.ends_with(DEFAULT_DATABASE_FILE));
    }

    #[test]
    #[serial]
    fn test_priority_cli_over_env_over_toml() {
        clear_env();
        let toml = TomlConfig {
            database_path: Some(PathBuf::from("/toml/sqlite.db")),
            page_size: Some(12),
            sort: Some("view_count".to_string()),
            ..Default::default()
        };

        // TOML only
        let config = SearchConfig::from_sources(&ConfigOverrides::default(), Some(&toml)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/toml/sqlite.db"));
        assert_eq!(config.page_size, 12);
        assert_eq!(config.sort, SortKey::ViewCount);

        // Environment beats TOML
        std::env::set_var(ENV_DATABASE_PATH, "/env/sqlite.db");
        std::env::set_var(ENV_PAGE_SIZE, "24");
        let config = SearchConfig::from_sources(&ConfigOverrides::default(), Some(&toml)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/env/sqlite.db"));
        assert_eq!(config.page_size, 24);

        // CLI beats environment
        let overrides = ConfigOverrides {
            database_path: Some(PathBuf::from("/cli/sqlite.db")),
            page_size: Some(6),
            sort: Some("published_at".to_string()),
            ..Default::default()
        };
        let config = SearchConfig::from_sources(&overrides, Some(&toml)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/cli/sqlite.db"));
        assert_eq!(config.page_size, 6);
        assert_eq!(config.sort, SortKey::PublishedAt);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_config_errors() {
        clear_env();

        let zero_page = ConfigOverrides {
            page_size: Some(0),
            ..Default::default()
        };
        let err = SearchConfig::from_sources(&zero_page, None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let bad_sort = ConfigOverrides {
            sort: Some("likes".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            SearchConfig::from_sources(&bad_sort, None),
            Err(Error::Config(_))
        ));

        std::env::set_var(ENV_PAGE_SIZE, "many");
        assert!(matches!(
            SearchConfig::from_sources(&ConfigOverrides::default(), None),
            Err(Error::Config(_))
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_explicit_config_file_is_loaded() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let written = TomlConfig {
            bind_address: Some("0.0.0.0:8080".to_string()),
            unpaginated_cap: Some(100),
            busy_timeout_ms: Some(250),
            ..Default::default()
        };
        write_toml_config(&written, &path).unwrap();
        assert_eq!(load_toml_config(&path).unwrap(), written);

        let overrides = ConfigOverrides {
            config_file: Some(path),
            ..Default::default()
        };
        let config = SearchConfig::resolve(&overrides).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.unpaginated_cap, 100);
        assert_eq!(config.busy_timeout_ms, 250);
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let overrides = ConfigOverrides {
            config_file: Some(PathBuf::from("/nonexistent/tvs/config.toml")),
            ..Default::default()
        };
        assert!(matches!(SearchConfig::resolve(&overrides), Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = \"lots\"").unwrap();

        let err = load_toml_config(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML"));
    }
}

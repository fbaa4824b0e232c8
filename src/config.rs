//! Configuration system using TOML files.
//!
//! Config is read from the OS-standard config directory unless a path is
//! given explicitly:
//! - Windows: %APPDATA%\tunelink\config.toml
//! - macOS: ~/Library/Application Support/tunelink/config.toml
//! - Linux: ~/.config/tunelink/config.toml
//!
//! Every section is optional. A platform without a `[platforms.<tag>]`
//! table keeps its built-in defaults. Credentials can also come from
//! `TUNELINK_<TAG>_KEY` / `TUNELINK_<TAG>_SECRET` environment variables,
//! which win over the file.
//!
//! ```toml
//! [http]
//! timeout_ms = 8000
//!
//! [search]
//! aggregate_limit = 50
//!
//! [platforms.qobuz]
//! key = "your-app-id"
//! enable = { api = true, website = true }
//! capabilities = { track_search = true, album_search = true, lookup = true }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::platform::registry::KNOWN_TAGS;
use crate::platform::{AGGREGATE_LIMIT, Capabilities};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Outbound HTTP client tuning
    pub http: HttpConfig,

    /// Aggregate search tuning
    pub search: SearchConfig,

    /// Per-platform settings, keyed by tag
    pub platforms: BTreeMap<String, PlatformSettings>,
}

/// Outbound HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout
    pub timeout_ms: u64,

    pub connect_timeout_ms: u64,

    pub max_redirects: usize,

    /// Overrides the default `tunelink/<version>` user agent
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 8_000,
            connect_timeout_ms: 2_000,
            max_redirects: 5,
            user_agent: None,
        }
    }
}

/// Aggregate search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Per-adapter timeout during aggregate search
    pub adapter_timeout_ms: u64,

    /// Upper bound on aggregated results
    pub aggregate_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            adapter_timeout_ms: 5_000,
            aggregate_limit: AGGREGATE_LIMIT,
        }
    }
}

/// Where a platform may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnableFlags {
    pub api: bool,
    pub website: bool,
}

impl Default for EnableFlags {
    fn default() -> Self {
        Self {
            api: true,
            website: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityFlags {
    pub track_search: bool,
    pub album_search: bool,
    pub lookup: bool,
}

impl Default for CapabilityFlags {
    fn default() -> Self {
        Self {
            track_search: true,
            album_search: true,
            lookup: true,
        }
    }
}

impl CapabilityFlags {
    pub fn to_capabilities(self) -> Capabilities {
        let mut caps = Capabilities::empty();
        caps.set(Capabilities::TRACK_SEARCH, self.track_search);
        caps.set(Capabilities::ALBUM_SEARCH, self.album_search);
        caps.set(Capabilities::LOOKUP, self.lookup);
        caps
    }
}

/// One `[platforms.<tag>]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    pub enable: EnableFlags,

    /// Pre-selected in clients' platform pickers
    pub default: bool,

    pub capabilities: CapabilityFlags,

    /// App id, token or OAuth consumer key, depending on the platform
    pub key: String,

    /// OAuth consumer secret
    pub secret: String,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            enable: EnableFlags::default(),
            default: true,
            capabilities: CapabilityFlags::default(),
            key: String::new(),
            secret: String::new(),
        }
    }
}

impl PlatformSettings {
    /// Settings for a platform with no config table.
    pub fn disabled() -> Self {
        Self {
            enable: EnableFlags {
                api: false,
                website: false,
            },
            default: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enable.api || self.enable.website
    }
}

impl Config {
    /// Apply `TUNELINK_<TAG>_KEY` / `_SECRET` overrides from `lookup`.
    ///
    /// A credential for a platform without a table creates one with
    /// default (enabled) settings.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for tag in KNOWN_TAGS {
            let upper = tag.to_ascii_uppercase();
            let key = lookup(&format!("TUNELINK_{}_KEY", upper)).filter(|v| !v.is_empty());
            let secret = lookup(&format!("TUNELINK_{}_SECRET", upper)).filter(|v| !v.is_empty());
            if key.is_none() && secret.is_none() {
                continue;
            }

            let settings = self.platforms.entry(tag.to_string()).or_default();
            if let Some(key) = key {
                settings.key = key;
            }
            if let Some(secret) = secret {
                settings.secret = secret;
            }
            tracing::debug!(platform = tag, "Credentials taken from environment");
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tunelink"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Parse a config file. Unlike [`load`], a missing file is an error.
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;

    let config = toml::from_str(&contents).map_err(|source| Error::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load configuration from `path`, or from the default location.
///
/// A missing default file yields the default configuration; an explicit
/// path must exist. Environment overrides are applied in both cases.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from(path)?,
        None => match config_path() {
            Some(path) if path.exists() => load_from(&path)?,
            Some(path) => {
                tracing::info!("No config file found at {:?}, using defaults", path);
                Config::default()
            }
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                Config::default()
            }
        },
    };

    config.apply_env_overrides(|name| std::env::var(name).ok());
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::temp_config;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[http]"));
        assert!(toml.contains("[search]"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[platforms.qobuz]
key = "app-id"
capabilities = { album_search = false }
"#;
        let config: Config = toml::from_str(toml).unwrap();

        let qobuz = &config.platforms["qobuz"];
        assert_eq!(qobuz.key, "app-id");
        assert!(qobuz.enable.api && qobuz.enable.website);
        assert!(qobuz.capabilities.track_search);
        assert!(!qobuz.capabilities.album_search);

        assert_eq!(config.http.timeout_ms, 8_000);
        assert_eq!(config.search.aggregate_limit, AGGREGATE_LIMIT);
    }

    #[test]
    fn test_capability_flags_to_bitflags() {
        let flags = CapabilityFlags {
            track_search: true,
            album_search: false,
            lookup: true,
        };
        assert_eq!(
            flags.to_capabilities(),
            Capabilities::TRACK_SEARCH | Capabilities::LOOKUP
        );
    }

    #[test]
    fn test_env_overrides_win_over_file() {
        let mut config: Config = toml::from_str("[platforms.tidal]\nkey = \"from-file\"").unwrap();

        config.apply_env_overrides(|name| match name {
            "TUNELINK_TIDAL_KEY" => Some("from-env".to_string()),
            "TUNELINK_SEVENDIGITAL_KEY" => Some("ck".to_string()),
            "TUNELINK_SEVENDIGITAL_SECRET" => Some("cs".to_string()),
            _ => None,
        });

        assert_eq!(config.platforms["tidal"].key, "from-env");
        assert_eq!(config.platforms["sevendigital"].secret, "cs");
        assert!(config.platforms["sevendigital"].is_enabled());
        assert!(!config.platforms.contains_key("qobuz"));
    }

    #[test]
    fn test_load_from_file() {
        let (path, _dir) = temp_config("[search]\naggregate_limit = 20\n");

        let config = load_from(&path).unwrap();

        assert_eq!(config.search.aggregate_limit, 20);
    }

    #[test]
    fn test_load_from_missing_file_is_configuration_error() {
        let err = load_from(Path::new("/nonexistent/tunelink.toml")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let (path, _dir) = temp_config("[search\naggregate_limit = ");

        let err = load_from(&path).unwrap_err();

        assert!(matches!(err, Error::ParseConfig { .. }));
    }
}

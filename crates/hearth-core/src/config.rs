use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::news::{default_sources, SourceConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            fetch: FetchConfig::default(),
            news: NewsConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Configured sources; the built-in registry when the file has none
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    /// Articles taken from each source per fetch
    #[serde(default = "default_max_per_source")]
    pub max_per_source: usize,
    /// Articles kept in the merged batch
    #[serde(default = "default_max_total")]
    pub max_total: usize,
    /// Article cache lifetime in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Title budget (characters) for the article feed
    #[serde(default = "default_title_limit")]
    pub title_limit: usize,
    /// Tighter title budget for digest headlines
    #[serde(default = "default_digest_title_limit")]
    pub digest_title_limit: usize,
    /// Summary budget (characters)
    #[serde(default = "default_summary_limit")]
    pub summary_limit: usize,
    /// Headlines kept per digest theme
    #[serde(default = "default_max_per_theme")]
    pub max_per_theme: usize,
    /// Keep entries that only carry placeholder title/link
    #[serde(default)]
    pub keep_placeholders: bool,
    /// Keep entries without a parseable timestamp in the digest
    #[serde(default)]
    pub digest_keep_undated: bool,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            max_per_source: default_max_per_source(),
            max_total: default_max_total(),
            cache_ttl_secs: default_cache_ttl(),
            title_limit: default_title_limit(),
            digest_title_limit: default_digest_title_limit(),
            summary_limit: default_summary_limit(),
            max_per_theme: default_max_per_theme(),
            keep_placeholders: false,
            digest_keep_undated: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    /// Display name for the configured coordinates
    #[serde(default = "default_city")]
    pub city: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            city: default_city(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hearth")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    8
}

fn default_max_per_source() -> usize {
    5
}

fn default_max_total() -> usize {
    20
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

fn default_title_limit() -> usize {
    100
}

fn default_digest_title_limit() -> usize {
    80
}

fn default_summary_limit() -> usize {
    200
}

fn default_max_per_theme() -> usize {
    3
}

fn default_latitude() -> f64 {
    47.6769
}

fn default_longitude() -> f64 {
    -122.2060
}

fn default_city() -> String {
    "Kirkland, WA".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/hearth/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("hearth")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::feed::Category;

/// Environment variable that overrides `account.token`
pub const TOKEN_ENV: &str = "FLIPFEED_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Locations of the news, search and summarization endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Paginated news listing
    #[serde(default = "default_news_path")]
    pub news_path: String,
    /// Free-text search
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Batched summarization
    #[serde(default = "default_summarize_path")]
    pub summarize_path: String,
    /// Per-call request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            news_path: default_news_path(),
            search_path: default_search_path(),
            summarize_path: default_summarize_path(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Seconds a loaded page stays fresh
    #[serde(default = "default_stale_secs")]
    pub stale_secs: u64,
    /// Delay before the automatic retry, in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    /// Categories enabled at startup
    #[serde(default)]
    pub default_categories: Vec<Category>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            stale_secs: default_stale_secs(),
            retry_delay_ms: default_retry_delay(),
            default_categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Path of the current-user resource on the auth backend
    #[serde(default = "default_account_path")]
    pub path: String,
    /// HTTP verb for profile updates: "PUT" or "PATCH"
    #[serde(default = "default_account_method")]
    pub method: String,
    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            path: default_account_path(),
            method: default_account_method(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show publication dates on cards
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_timestamps: default_true(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_news_path() -> String {
    "/api/news".to_string()
}

fn default_search_path() -> String {
    "/api/search".to_string()
}

fn default_summarize_path() -> String {
    "/summarize".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_stale_secs() -> u64 {
    300 // 5 minutes
}

fn default_retry_delay() -> u64 {
    500
}

fn default_account_path() -> String {
    "/auth/me".to_string()
}

fn default_account_method() -> String {
    "PUT".to_string()
}

fn default_tick_rate() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.trim().is_empty() {
                config.account.token = Some(token);
            }
        }

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/flipfeed/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("flipfeed")
            .join("config.toml")
    }

    /// Directory for logs written while the TUI owns the terminal
    pub fn data_dir(&self) -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("flipfeed")
    }

    /// Get the log file path used in TUI mode
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("flipfeed.log")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs.max(1))
    }

    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.feed.stale_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.feed.retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend_layout() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.news_path, "/api/news");
        assert_eq!(config.api.summarize_path, "/summarize");
        assert_eq!(config.freshness(), Duration::from_secs(300));
        assert_eq!(config.account.method, "PUT");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "http://news.internal:9000"

            [feed]
            stale_secs = 60
            default_categories = ["sports", "politics"]
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://news.internal:9000");
        assert_eq!(config.api.search_path, "/api/search");
        assert_eq!(config.freshness(), Duration::from_secs(60));
        assert_eq!(
            config.feed.default_categories,
            vec![Category::Sports, Category::Politics]
        );
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}

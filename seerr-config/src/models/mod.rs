pub mod sources;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_RESULTS, DEFAULT_PARKED_DELAY, DEFAULT_READINESS_ATTEMPTS,
    DEFAULT_READINESS_FACTOR, DEFAULT_READINESS_INTERVAL,
    DEFAULT_READINESS_MAX_INTERVAL, DEFAULT_SCROLL_DELAY,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SETTLE_DELAY,
    DEFAULT_UPSTREAM_TIMEOUT,
};

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub discovery: DiscoveryConfig,
    pub display: DisplayConfig,
    pub loader: LoaderTiming,
    pub readiness: ReadinessConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    /// Snapshot consumed by a catalog session when it starts.
    pub fn loader_settings(&self) -> LoaderSettings {
        LoaderSettings {
            exclude_talk_shows: self.discovery.exclude_talk_shows,
            strict_title_filter: self.discovery.strict_title_filter,
            enable_infinite_scroll: self.discovery.enable_infinite_scroll,
            max_results: self.discovery.max_results,
        }
    }

    pub fn upstream_configured(&self) -> bool {
        self.upstream
            .url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connection details for the recommendation proxy.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub enabled: bool,
    /// Upper bound on person-credit results; `0` disables truncation.
    pub max_results: usize,
    pub include_library_items: bool,
    pub exclude_talk_shows: bool,
    pub strict_title_filter: bool,
    pub enable_infinite_scroll: bool,
    pub debug_mode: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_results: DEFAULT_MAX_RESULTS,
            include_library_items: true,
            exclude_talk_shows: true,
            strict_title_filter: true,
            enable_infinite_scroll: true,
            debug_mode: false,
        }
    }
}

/// Presentation toggles forwarded verbatim to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_person_discovery: bool,
    pub show_cast_credits: bool,
    pub show_crew_credits: bool,
    pub show_studio_discovery: bool,
    pub show_media_status: bool,
    pub show_media_type_badge: bool,
    pub show_ratings: bool,
    pub show_year: bool,
    pub show_overview_on_hover: bool,
    pub show_collection_badge: bool,
    pub show_role_name: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_person_discovery: true,
            show_cast_credits: true,
            show_crew_credits: true,
            show_studio_discovery: true,
            show_media_status: true,
            show_media_type_badge: true,
            show_ratings: true,
            show_year: true,
            show_overview_on_hover: true,
            show_collection_badge: true,
            show_role_name: true,
        }
    }
}

/// Pacing for the incremental catalog loader and navigation handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderTiming {
    /// Minimum gap between fetches while the user is actively scrolling.
    pub scroll_delay: Duration,
    /// Minimum gap while the load trigger has stayed in view.
    pub parked_delay: Duration,
    /// Pause after a navigation signal before acting on it.
    pub settle_delay: Duration,
}

impl Default for LoaderTiming {
    fn default() -> Self {
        Self {
            scroll_delay: DEFAULT_SCROLL_DELAY,
            parked_delay: DEFAULT_PARKED_DELAY,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessBackoff {
    #[default]
    Fixed,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadinessConfig {
    pub max_attempts: u32,
    pub interval: Duration,
    pub backoff: ReadinessBackoff,
    /// Growth factor for exponential backoff.
    pub factor: f64,
    pub max_interval: Duration,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_READINESS_ATTEMPTS,
            interval: DEFAULT_READINESS_INTERVAL,
            backoff: ReadinessBackoff::Fixed,
            factor: DEFAULT_READINESS_FACTOR,
            max_interval: DEFAULT_READINESS_MAX_INTERVAL,
        }
    }
}

/// Read-only values a catalog session captures when it starts. Later
/// configuration changes never reach a session already in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSettings {
    pub exclude_talk_shows: bool,
    pub strict_title_filter: bool,
    pub enable_infinite_scroll: bool,
    pub max_results: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Config::default().loader_settings()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}

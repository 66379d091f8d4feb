use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::CONFIG_PATH_ENV;
use crate::loader::error::ConfigLoadError;
use crate::util::{non_blank, parse_bool, parse_duration};

use super::{DisplayConfig, ReadinessBackoff};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub upstream: FileUpstreamConfig,
    #[serde(default)]
    pub discovery: FileDiscoveryConfig,
    pub display: Option<DisplayConfig>,
    #[serde(default)]
    pub loader: FileLoaderConfig,
    #[serde(default)]
    pub readiness: FileReadinessConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileUpstreamConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDiscoveryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_library_items: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_talk_shows: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict_title_filter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_infinite_scroll: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_mode: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileLoaderConfig {
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub scroll_delay: Option<Duration>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub parked_delay: Option<Duration>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub settle_delay: Option<Duration>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileReadinessConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff: Option<ReadinessBackoff>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factor: Option<f64>,
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_interval: Option<Duration>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub upstream_url: Option<String>,
    pub upstream_api_key: Option<String>,
    pub upstream_timeout: Option<Duration>,
    pub enabled: Option<bool>,
    pub max_results: Option<usize>,
    pub include_library_items: Option<bool>,
    pub exclude_talk_shows: Option<bool>,
    pub strict_title_filter: Option<bool>,
    pub enable_infinite_scroll: Option<bool>,
    pub debug_mode: Option<bool>,
    pub scroll_delay: Option<Duration>,
    pub parked_delay: Option<Duration>,
    pub settle_delay: Option<Duration>,
}

impl EnvConfig {
    /// Read the process environment.
    pub fn gather() -> Result<Self, ConfigLoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset;
    /// values that are present but unparseable are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| non_blank(lookup(key));

        Ok(Self {
            config_path: var(CONFIG_PATH_ENV).map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: parsed(&var, "SERVER_PORT", "a port number", |raw| {
                raw.parse().ok()
            })?,
            upstream_url: var("SEERR_URL"),
            upstream_api_key: var("SEERR_API_KEY"),
            upstream_timeout: duration(&var, "SEERR_TIMEOUT")?,
            enabled: boolean(&var, "DISCOVERY_ENABLED")?,
            max_results: parsed(
                &var,
                "DISCOVERY_MAX_RESULTS",
                "a non-negative integer",
                |raw| raw.parse().ok(),
            )?,
            include_library_items: boolean(
                &var,
                "DISCOVERY_INCLUDE_LIBRARY_ITEMS",
            )?,
            exclude_talk_shows: boolean(&var, "DISCOVERY_EXCLUDE_TALK_SHOWS")?,
            strict_title_filter: boolean(
                &var,
                "DISCOVERY_STRICT_TITLE_FILTER",
            )?,
            enable_infinite_scroll: boolean(
                &var,
                "DISCOVERY_ENABLE_INFINITE_SCROLL",
            )?,
            debug_mode: boolean(&var, "DISCOVERY_DEBUG")?,
            scroll_delay: duration(&var, "LOADER_SCROLL_DELAY")?,
            parked_delay: duration(&var, "LOADER_PARKED_DELAY")?,
            settle_delay: duration(&var, "LOADER_SETTLE_DELAY")?,
        })
    }
}

fn parsed<V, T>(
    var: &V,
    key: &'static str,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, ConfigLoadError>
where
    V: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(None),
        Some(raw) => parse(&raw).map(Some).ok_or(ConfigLoadError::InvalidEnv {
            key,
            value: raw,
            expected,
        }),
    }
}

fn boolean<V>(var: &V, key: &'static str) -> Result<Option<bool>, ConfigLoadError>
where
    V: Fn(&str) -> Option<String>,
{
    parsed(var, key, "a boolean (1/0, true/false, yes/no, on/off)", parse_bool)
}

fn duration<V>(
    var: &V,
    key: &'static str,
) -> Result<Option<Duration>, ConfigLoadError>
where
    V: Fn(&str) -> Option<String>,
{
    parsed(var, key, "a duration such as `500ms` or `4s`", parse_duration)
}

pub mod error;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::DEFAULT_CONFIG_LOCATIONS;
use crate::models::sources::{EnvConfig, FileConfig};
use crate::models::{
    Config, ConfigMetadata, DiscoveryConfig, LoaderTiming, ReadinessConfig,
    ServerConfig, UpstreamConfig,
};
use crate::validation::{self, ConfigWarnings};

use error::ConfigLoadError;

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
    /// Skip `.env` files and the process environment entirely.
    pub ignore_environment: bool,
}

#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn ignore_environment(mut self) -> Self {
        self.options.ignore_environment = true;
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        if self.options.ignore_environment {
            return self.load_with_env(EnvConfig::default(), false);
        }

        let env_file_loaded = self.load_env_file()?;
        let env = EnvConfig::gather()?;
        self.load_with_env(env, env_file_loaded)
    }

    /// Compose a configuration from an already gathered environment.
    pub fn load_with_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file, config_path) = self.load_file_config(&env)?;
        let config = compose(
            file.unwrap_or_default(),
            env,
            ConfigMetadata {
                config_path,
                env_file_loaded,
            },
        );
        let warnings = validation::collect_warnings(&config);
        Ok(ConfigLoad { config, warnings })
    }

    fn load_env_file(&self) -> Result<bool, ConfigLoadError> {
        let result = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match result {
            Ok(()) => Ok(true),
            Err(dotenvy::Error::Io(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        // An explicitly named file must exist; defaults are optional.
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .map(PathBuf::from)
                .find(|candidate| candidate.exists())
            {
                Some(path) => path,
                None => return Ok((None, None)),
            },
        };

        let file_config = read_file_config(&path)?;
        debug!(path = %path.display(), "loaded configuration file");
        Ok((Some(file_config), Some(path)))
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    toml::from_str(&contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Layer environment over file over defaults.
fn compose(file: FileConfig, env: EnvConfig, metadata: ConfigMetadata) -> Config {
    let defaults = Config::default();

    let server = ServerConfig {
        host: env
            .server_host
            .or(file.server.host)
            .unwrap_or(defaults.server.host),
        port: env
            .server_port
            .or(file.server.port)
            .unwrap_or(defaults.server.port),
    };

    let upstream = UpstreamConfig {
        url: env
            .upstream_url
            .or(file.upstream.url)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty()),
        api_key: env
            .upstream_api_key
            .or(file.upstream.api_key)
            .filter(|key| !key.trim().is_empty()),
        timeout: env
            .upstream_timeout
            .or(file.upstream.timeout)
            .unwrap_or(defaults.upstream.timeout),
    };

    let d = defaults.discovery;
    let discovery = DiscoveryConfig {
        enabled: env.enabled.or(file.discovery.enabled).unwrap_or(d.enabled),
        max_results: env
            .max_results
            .or(file.discovery.max_results)
            .unwrap_or(d.max_results),
        include_library_items: env
            .include_library_items
            .or(file.discovery.include_library_items)
            .unwrap_or(d.include_library_items),
        exclude_talk_shows: env
            .exclude_talk_shows
            .or(file.discovery.exclude_talk_shows)
            .unwrap_or(d.exclude_talk_shows),
        strict_title_filter: env
            .strict_title_filter
            .or(file.discovery.strict_title_filter)
            .unwrap_or(d.strict_title_filter),
        enable_infinite_scroll: env
            .enable_infinite_scroll
            .or(file.discovery.enable_infinite_scroll)
            .unwrap_or(d.enable_infinite_scroll),
        debug_mode: env
            .debug_mode
            .or(file.discovery.debug_mode)
            .unwrap_or(d.debug_mode),
    };

    let loader = LoaderTiming {
        scroll_delay: env
            .scroll_delay
            .or(file.loader.scroll_delay)
            .unwrap_or(defaults.loader.scroll_delay),
        parked_delay: env
            .parked_delay
            .or(file.loader.parked_delay)
            .unwrap_or(defaults.loader.parked_delay),
        settle_delay: env
            .settle_delay
            .or(file.loader.settle_delay)
            .unwrap_or(defaults.loader.settle_delay),
    };

    let r = defaults.readiness;
    let readiness = ReadinessConfig {
        max_attempts: file.readiness.max_attempts.unwrap_or(r.max_attempts),
        interval: file.readiness.interval.unwrap_or(r.interval),
        backoff: file.readiness.backoff.unwrap_or(r.backoff),
        factor: file
            .readiness
            .factor
            .filter(|factor| factor.is_finite() && *factor >= 1.0)
            .unwrap_or(r.factor),
        max_interval: file.readiness.max_interval.unwrap_or(r.max_interval),
    };

    Config {
        server,
        upstream,
        discovery,
        display: file.display.unwrap_or(defaults.display),
        loader,
        readiness,
        metadata,
    }
}

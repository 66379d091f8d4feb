use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("environment variable {key}={value:?} is not {expected}")]
    InvalidEnv {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

//! Configuration for the Seerr discovery server.
//!
//! Values are layered environment over TOML file over built-in defaults.
//! Loading yields a [`Config`] snapshot plus [`ConfigWarnings`] for settings
//! that are legal but probably not what the operator intended.

pub mod constants;
pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{
    ConfigLoad, ConfigLoader, ConfigLoaderOptions, error::ConfigLoadError,
};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    Config, ConfigMetadata, DiscoveryConfig, DisplayConfig, LoaderSettings,
    LoaderTiming, ReadinessBackoff, ReadinessConfig, ServerConfig,
    UpstreamConfig,
};
pub use validation::{ConfigWarning, ConfigWarnings};

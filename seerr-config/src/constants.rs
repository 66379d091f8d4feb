use std::time::Duration;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8787;

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_MAX_RESULTS: usize = 50;

pub const DEFAULT_SCROLL_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_PARKED_DELAY: Duration = Duration::from_secs(4);
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

pub const DEFAULT_READINESS_ATTEMPTS: u32 = 25;
pub const DEFAULT_READINESS_INTERVAL: Duration = Duration::from_millis(300);
pub const DEFAULT_READINESS_FACTOR: f64 = 2.0;
pub const DEFAULT_READINESS_MAX_INTERVAL: Duration = Duration::from_secs(5);

/// Searched in order when no explicit path is given.
pub const DEFAULT_CONFIG_LOCATIONS: &[&str] = &["seerr.toml", "config/seerr.toml"];

pub const CONFIG_PATH_ENV: &str = "SEERR_CONFIG_PATH";

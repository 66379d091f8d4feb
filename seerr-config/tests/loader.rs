use std::io::Write;
use std::time::Duration;

use seerr_config::{
    ConfigLoadError, ConfigLoader, EnvConfig, ReadinessBackoff,
};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn file_values_override_defaults() {
    let file = write_config(
        r#"
        [server]
        port = 9100

        [upstream]
        url = "http://seerr.lan:5055/"
        api_key = "secret"
        timeout = "3s"

        [discovery]
        max_results = 20
        strict_title_filter = false

        [display]
        show_crew_credits = false

        [loader]
        parked_delay = "6s"

        [readiness]
        max_attempts = 5
        backoff = "exponential"
        "#,
    );

    let load = ConfigLoader::new()
        .with_config_path(file.path())
        .ignore_environment()
        .load()
        .expect("config loads");
    let config = load.config;

    assert_eq!(config.server.port, 9100);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.upstream.url.as_deref(), Some("http://seerr.lan:5055"));
    assert_eq!(config.upstream.timeout, Duration::from_secs(3));
    assert_eq!(config.discovery.max_results, 20);
    assert!(!config.discovery.strict_title_filter);
    assert!(config.discovery.exclude_talk_shows);
    assert!(!config.display.show_crew_credits);
    assert!(config.display.show_cast_credits);
    assert_eq!(config.loader.parked_delay, Duration::from_secs(6));
    assert_eq!(config.loader.scroll_delay, Duration::from_secs(1));
    assert_eq!(config.readiness.max_attempts, 5);
    assert_eq!(config.readiness.backoff, ReadinessBackoff::Exponential);
    assert_eq!(config.metadata.config_path.as_deref(), Some(file.path()));
    assert!(load.warnings.is_empty());
}

#[test]
fn environment_wins_over_file() {
    let file = write_config(
        r#"
        [upstream]
        url = "http://file.example"

        [discovery]
        exclude_talk_shows = true
        "#,
    );
    let env = EnvConfig {
        upstream_url: Some("https://env.example".into()),
        exclude_talk_shows: Some(false),
        ..EnvConfig::default()
    };

    let config = ConfigLoader::new()
        .with_config_path(file.path())
        .load_with_env(env, false)
        .expect("config loads")
        .config;

    assert_eq!(config.upstream.url.as_deref(), Some("https://env.example"));
    assert!(!config.discovery.exclude_talk_shows);
    assert!(!config.loader_settings().exclude_talk_shows);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ConfigLoader::new()
        .with_config_path(dir.path().join("absent.toml"))
        .ignore_environment()
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::MissingConfig { .. }));
}

#[test]
fn malformed_file_is_an_error() {
    let file = write_config("[server]\nport = \"not a number\"\n");
    let err = ConfigLoader::new()
        .with_config_path(file.path())
        .ignore_environment()
        .load()
        .unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
}

#[test]
fn zero_max_results_is_only_a_warning() {
    let file = write_config(
        r#"
        [upstream]
        url = "http://seerr.lan"
        api_key = "k"

        [discovery]
        max_results = 0
        "#,
    );
    let load = ConfigLoader::new()
        .with_config_path(file.path())
        .ignore_environment()
        .load()
        .expect("config loads");

    assert_eq!(load.config.discovery.max_results, 0);
    assert_eq!(load.warnings.len(), 1);
}

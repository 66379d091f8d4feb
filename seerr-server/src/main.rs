use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use seerr_config::{ConfigLoad, ConfigLoader};
use seerr_core::{
    JellyseerrGateway, ReadinessPolicy, UpstreamGateway, wait_until_ready,
};
use seerr_server::{AppState, create_app, infra::telemetry};
use tracing::{info, warn};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "seerr-server")]
#[command(about = "Discover titles missing from your library through Jellyseerr")]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.with_config_path(path);
    }
    let ConfigLoad {
        mut config,
        warnings,
    } = loader.load().context("failed to load configuration")?;

    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    telemetry::init_tracing(config.discovery.debug_mode);

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }
    if let Some(path) = config.metadata.config_path.as_ref() {
        info!(path = %path.display(), "configuration file loaded");
    }
    for warning in warnings.iter() {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    let config = Arc::new(config);
    let gateway: Arc<dyn UpstreamGateway> = Arc::new(
        JellyseerrGateway::new(&config.upstream)
            .context("failed to build upstream HTTP client")?,
    );

    if gateway.is_configured() {
        let policy = ReadinessPolicy::from(&config.readiness);
        let probe = gateway.clone();
        let ready = wait_until_ready(&policy, || {
            let gateway = probe.clone();
            async move { gateway.test_connection().await.is_ok() }
        })
        .await;
        match ready {
            Ok(attempt) => info!(attempt, "upstream reachable"),
            Err(err) => {
                warn!(error = %err, "upstream not reachable yet; serving anyway")
            }
        }
    } else {
        warn!("no upstream URL configured; discovery requests will fail");
    }

    let app = create_app(AppState::new(config.clone(), gateway));
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        address = %addr,
        enabled = config.discovery.enabled,
        "starting Seerr discovery server"
    );
    axum::serve(listener, app).await?;

    Ok(())
}

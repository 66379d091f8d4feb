use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,seerr_core=info,tower_http=warn";
const DEBUG_FILTER: &str =
    "info,seerr_core=debug,seerr_server=debug,seerr_config=debug,tower_http=info";

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(debug_mode: bool) -> &'static str {
    if debug_mode { DEBUG_FILTER } else { DEFAULT_FILTER }
}

/// Install the global subscriber. `RUST_LOG` wins over `debug_mode`.
pub fn init_tracing(debug_mode: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(debug_mode).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

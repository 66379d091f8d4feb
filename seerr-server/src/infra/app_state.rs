use std::{fmt, sync::Arc};

use seerr_config::Config;
use seerr_core::{DiscoveryService, UpstreamGateway};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub discovery: Arc<DiscoveryService>,
}

impl AppState {
    pub fn new(config: Arc<Config>, gateway: Arc<dyn UpstreamGateway>) -> Self {
        let discovery = Arc::new(DiscoveryService::new(gateway, config.clone()));
        Self { config, discovery }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

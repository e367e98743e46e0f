use crate::config::GatewayConfig;
use releasify::ReleaseClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub release_client: Arc<dyn ReleaseClient>,
}

impl AppState {
    pub fn new(config: GatewayConfig, release_client: Arc<dyn ReleaseClient>) -> Self {
        Self {
            config: Arc::new(config),
            release_client,
        }
    }
}

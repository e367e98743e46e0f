use std::sync::Arc;

use releasify::HttpReleaseClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use releasify_gateway::config::{GatewayConfig, LogLevel};
use releasify_gateway::server;

fn init_tracing(level: LogLevel) {
    // RUST_LOG, when set, wins over LOG_LEVEL
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.as_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("releasify-gateway: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.log_level);
    tracing::debug!(?config, "Loaded configuration");

    let release_client =
        match HttpReleaseClient::new(&config.release_service_url, config.release_service_timeout) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("Failed to build release client: {}", e);
                std::process::exit(1);
            }
        };

    server::run(config, Arc::new(release_client)).await
}

use std::io;
use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};
use releasify::ReleaseClient;

use crate::config::GatewayConfig;
use crate::cors::build_cors;
use crate::routes;
use crate::state::AppState;

/// Run the gateway until the server is stopped.
///
/// Everything the server needs is passed in; nothing is read from the
/// environment here.
pub async fn run(config: GatewayConfig, release_client: Arc<dyn ReleaseClient>) -> io::Result<()> {
    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    let max_body_bytes = config.max_body_bytes;

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(config.rate_limit_rpm)
        .finish()
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid rate limiter configuration",
            )
        })?;

    tracing::info!("Starting releasify-gateway on port {}", port);
    tracing::info!("Release service: {}", config.release_service_url);
    tracing::info!("Rate limit: {} req/min per IP", config.rate_limit_rpm);
    if config.metrics_token.is_none() {
        tracing::warn!("METRICS_TOKEN not set, /metrics endpoint is publicly accessible");
    }

    let state_data = web::Data::new(AppState::new(config, release_client));

    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .app_data(web::PayloadConfig::new(max_body_bytes))
            .wrap(Logger::default())
            .wrap(build_cors(&allowed_origins))
            .wrap(Governor::new(&governor_conf))
            .configure(routes::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

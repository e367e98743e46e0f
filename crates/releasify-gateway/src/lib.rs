pub mod args;
pub mod auth;
pub mod config;
pub mod cors;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;
pub mod status;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use state::AppState;

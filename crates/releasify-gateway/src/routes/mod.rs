pub mod health;
pub mod index;
pub mod releases;

use actix_web::web;

/// Mount every gateway route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(index::configure)
        .configure(health::configure)
        .configure(releases::configure);
}

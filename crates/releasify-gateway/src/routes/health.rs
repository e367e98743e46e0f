use actix_web::{http::header, web, HttpRequest, HttpResponse};

use crate::metrics;
use crate::state::AppState;

/// GET /healthcheck - Liveness probe
pub async fn healthcheck() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

/// Constant-time byte comparison that does not leak input lengths.
/// Both inputs are hashed to fixed-length digests before comparison.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use sha2::{Digest, Sha256};
    use subtle::ConstantTimeEq;
    let ha = Sha256::digest(a);
    let hb = Sha256::digest(b);
    ha.ct_eq(&hb).into()
}

/// GET /metrics - Prometheus metrics endpoint (optionally auth-gated)
pub async fn metrics_endpoint(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    if let Some(ref expected_token) = state.config.metrics_token {
        let authorized = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|token| constant_time_eq(token.as_bytes(), expected_token.as_bytes()))
            .unwrap_or(false);

        if !authorized {
            return HttpResponse::Unauthorized().json(serde_json::json!({
                "title": "401 Unauthorized",
                "description": "Valid Bearer token required for /metrics"
            }));
        }
    }

    match metrics::metrics_output() {
        Ok(output) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(output),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            HttpResponse::InternalServerError().body("Failed to encode metrics")
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthcheck", web::get().to(healthcheck))
        .route("/metrics", web::get().to(metrics_endpoint));
}

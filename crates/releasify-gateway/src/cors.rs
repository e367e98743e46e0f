//! CORS configuration for the gateway.

use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS middleware from allowed origins.
///
/// With no origins configured only `http://localhost[:port]` is accepted.
pub fn build_cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allowed_origin_fn(|origin, _req_head| {
            origin
                .to_str()
                .map(|o| o == "http://localhost" || o.starts_with("http://localhost:"))
                .unwrap_or(false)
        })
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(3600)
}

use actix_web::{web, HttpResponse};

pub const INDEX_BODY: &str = "\
Hi there! This is the index route of the Releasify API.
You're probably looking for the /releases endpoint.
There's also a handy /healthcheck endpoint if you just want to test that the API is running.
";

/// GET / - Informational landing page
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_BODY)
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}

use std::time::Instant;

use actix_web::{web, HttpResponse};
use releasify::{ReleaseError, ReleaseRequest};

use crate::args::{optional_flag, optional_string, parse_json_body, required_string, Args};
use crate::auth::BasicAuth;
use crate::error::GatewayError;
use crate::metrics;
use crate::state::AppState;
use crate::status::translate_status;

/// Body field names accepted by `POST /releases`.
pub mod fields {
    pub const OWNER: &str = "owner";
    pub const REPO: &str = "repo";
    pub const RELEASE_TYPE: &str = "type";
    pub const DRY_RUN: &str = "dry_run";
    pub const FORCE: &str = "force";
    pub const DRAFT: &str = "draft";
    pub const PRERELEASE: &str = "prerelease";
    pub const TARGET_BRANCH: &str = "target_branch";
}

/// Build a validated [`ReleaseRequest`] from the request body.
///
/// Required fields are checked in body order: `owner`, `repo`, `type`.
pub fn release_request_from_args(args: &Args) -> Result<ReleaseRequest, GatewayError> {
    let owner = required_string(args, fields::OWNER)?;
    let repo = required_string(args, fields::REPO)?;
    let release_type = required_string(args, fields::RELEASE_TYPE)?;

    Ok(ReleaseRequest {
        owner,
        repo,
        release_type,
        draft: optional_flag(args, fields::DRAFT, false),
        prerelease: optional_flag(args, fields::PRERELEASE, true),
        dry_run: optional_flag(args, fields::DRY_RUN, false),
        force_release: optional_flag(args, fields::FORCE, false),
        target_branch: optional_string(args, fields::TARGET_BRANCH)?,
    })
}

fn outcome_label(err: &ReleaseError) -> &'static str {
    match err {
        ReleaseError::Unauthorized => "unauthorized",
        ReleaseError::InvalidReleaseType(_) => "invalid_release_type",
        ReleaseError::NoCommits(_) => "no_commits",
        ReleaseError::NotFound(_) => "not_found",
        ReleaseError::Generic(_) => "error",
    }
}

/// POST /releases - Create (or dry-run) a release through the release client
pub async fn create_release(
    state: web::Data<AppState>,
    auth: BasicAuth,
    body: web::Bytes,
) -> Result<HttpResponse, GatewayError> {
    let args = parse_json_body(&body)?;
    let request = release_request_from_args(&args)?;

    tracing::info!(
        user = %auth.credentials().user,
        repo = %request.slug(),
        release_type = %request.release_type,
        dry_run = request.dry_run,
        prerelease = request.prerelease,
        "Creating release"
    );

    let start = Instant::now();
    let outcome = state
        .release_client
        .create_release(auth.credentials(), &request)
        .await;
    metrics::RELEASE_LATENCY.observe(start.elapsed().as_secs_f64());

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            metrics::RELEASE_REQUESTS
                .with_label_values(&[outcome_label(&e)])
                .inc();
            tracing::warn!(repo = %request.slug(), "Release failed: {}", e);
            return Err(e.into());
        }
    };

    metrics::RELEASE_REQUESTS.with_label_values(&["created"]).inc();
    tracing::info!(
        repo = %request.slug(),
        tag_name = %result.tag_name,
        upstream_status = result.upstream_status_code,
        "Release created"
    );

    Ok(
        HttpResponse::build(translate_status(result.upstream_status_code)).json(
            serde_json::json!({
                "body": result.body,
                "tag_name": result.tag_name,
                "dry_run": result.dry_run,
                "prerelease": result.prerelease,
            }),
        ),
    )
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/releases", web::post().to(create_release));
}

//! HTTP adapter for a remote release service.
//!
//! Forwards a validated [`ReleaseRequest`] to `POST {base}/releases` with the
//! caller's Basic credentials and turns the service's reply back into a
//! [`ReleaseResult`] or a classified [`ReleaseError`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::client::ReleaseClient;
use crate::credentials::Credentials;
use crate::error::ReleaseError;
use crate::release::{ReleaseRequest, ReleaseResult};

/// Error codes the release service uses for domain rejections.
pub const INVALID_RELEASE_TYPE: &str = "invalid_release_type";
pub const NO_COMMITS: &str = "no_commits";

#[derive(Debug, Default, Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct HttpReleaseClient {
    http: reqwest::Client,
    releases_url: Url,
}

impl HttpReleaseClient {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, ReleaseError> {
        let mut base = base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let releases_url = base
            .join("releases")
            .map_err(|e| ReleaseError::Generic(format!("invalid release service URL: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { http, releases_url })
    }

    pub fn releases_url(&self) -> &Url {
        &self.releases_url
    }
}

impl std::fmt::Debug for HttpReleaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpReleaseClient")
            .field("releases_url", &self.releases_url.as_str())
            .finish()
    }
}

#[async_trait]
impl ReleaseClient for HttpReleaseClient {
    async fn create_release(
        &self,
        credentials: &Credentials,
        request: &ReleaseRequest,
    ) -> Result<ReleaseResult, ReleaseError> {
        tracing::debug!(
            repo = %request.slug(),
            release_type = %request.release_type,
            dry_run = request.dry_run,
            "forwarding release to release service"
        );

        let resp = self
            .http
            .post(self.releases_url.clone())
            .basic_auth(&credentials.user, Some(&credentials.secret))
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::debug!(status = %status, "release service rejected request");
            return Err(classify_failure(status.as_u16(), &body));
        }

        let mut result: ReleaseResult = serde_json::from_str(&body)?;
        result.upstream_status_code = i64::from(status.as_u16());
        Ok(result)
    }
}

/// Map a non-2xx release service reply onto the domain error set.
pub fn classify_failure(status: u16, body: &str) -> ReleaseError {
    let parsed: ServiceErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("release service returned status {status}"));

    match (status, parsed.error.as_deref()) {
        (401 | 403, _) => ReleaseError::Unauthorized,
        (404, _) => ReleaseError::NotFound(message),
        (_, Some(INVALID_RELEASE_TYPE)) => ReleaseError::InvalidReleaseType(message),
        (_, Some(NO_COMMITS)) => ReleaseError::NoCommits(message),
        _ => ReleaseError::Generic(message),
    }
}

use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::error::ReleaseError;
use crate::release::{ReleaseRequest, ReleaseResult};

/// Boundary to whatever actually creates releases.
///
/// Implementations authenticate upstream with `credentials` and are expected
/// to report:
/// - [`ReleaseError::Unauthorized`] for rejected credentials
/// - [`ReleaseError::NotFound`] when `owner/repo` is missing or inaccessible
/// - [`ReleaseError::InvalidReleaseType`] for an unrecognized release type
/// - [`ReleaseError::NoCommits`] when there is nothing to release
///
/// When `request.dry_run` is set the release is computed but not published.
#[async_trait]
pub trait ReleaseClient: Send + Sync {
    async fn create_release(
        &self,
        credentials: &Credentials,
        request: &ReleaseRequest,
    ) -> Result<ReleaseResult, ReleaseError>;
}

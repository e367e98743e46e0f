use thiserror::Error;

/// Failures reported by a release client.
///
/// The set is closed: anything a client cannot classify ends up in
/// [`ReleaseError::Generic`].
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidReleaseType(String),

    #[error("{0}")]
    NoCommits(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Generic(String),
}

impl From<reqwest::Error> for ReleaseError {
    fn from(e: reqwest::Error) -> Self {
        ReleaseError::Generic(format!("release service request failed: {e}"))
    }
}

impl From<serde_json::Error> for ReleaseError {
    fn from(e: serde_json::Error) -> Self {
        ReleaseError::Generic(format!("invalid release service response: {e}"))
    }
}

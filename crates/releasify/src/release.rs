use serde::{Deserialize, Serialize};

/// A validated release request.
///
/// Every boolean here is already normalized; the gateway does the loose
/// coercion before building one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub owner: String,
    pub repo: String,
    pub release_type: String,
    pub draft: bool,
    pub prerelease: bool,
    pub dry_run: bool,
    pub force_release: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
}

impl ReleaseRequest {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        release_type: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            release_type: release_type.into(),
            draft: false,
            prerelease: true,
            dry_run: false,
            force_release: false,
            target_branch: None,
        }
    }

    /// `owner/repo`, used in log fields.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Outcome of a release as reported by the release client.
///
/// `body` is opaque to the gateway. Only `upstream_status_code` is
/// interpreted, to pick the response status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseResult {
    #[serde(default = "default_status_code")]
    pub upstream_status_code: i64,
    #[serde(default)]
    pub body: serde_json::Value,
    pub tag_name: String,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub prerelease: bool,
}

fn default_status_code() -> i64 {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_uses_documented_defaults() {
        let req = ReleaseRequest::new("octocat", "hello-world", "minor");
        assert!(req.prerelease);
        assert!(!req.draft);
        assert!(!req.dry_run);
        assert!(!req.force_release);
        assert_eq!(req.target_branch, None);
        assert_eq!(req.slug(), "octocat/hello-world");
    }

    #[test]
    fn target_branch_omitted_when_absent() {
        let req = ReleaseRequest::new("octocat", "hello-world", "patch");
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("target_branch").is_none());
        assert_eq!(json["release_type"], "patch");
    }

    #[test]
    fn result_deserializes_with_missing_optionals() {
        let result: ReleaseResult =
            serde_json::from_str(r#"{"tag_name": "v1.0.0"}"#).unwrap();
        assert_eq!(result.upstream_status_code, 200);
        assert_eq!(result.body, serde_json::Value::Null);
        assert!(!result.dry_run);
    }
}

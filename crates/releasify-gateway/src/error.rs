use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError};
use releasify::ReleaseError;
use std::fmt;

pub const BASIC_CHALLENGE: &str = "Basic realm=\"releasify\"";

/// Every failure the request pipeline can produce.
///
/// Handlers return these instead of building error responses themselves;
/// [`ResponseError`] below is the only place they turn into HTTP.
#[derive(Debug)]
pub enum GatewayError {
    /// No usable Basic credentials on the request
    Unauthenticated(&'static str),
    /// Basic token that is not base64, not UTF-8 or has no `:`
    MalformedCredentials(String),
    /// Request body is not a JSON object
    JsonBodyRequired,
    /// Required body field absent
    MissingRequiredArg(String),
    /// Body field present with the wrong JSON type
    InvalidArgType(String),
    /// Failure reported by the release client
    Release(ReleaseError),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Unauthenticated(msg) => write!(f, "{}", msg),
            GatewayError::MalformedCredentials(msg) => {
                write!(f, "malformed basic credentials: {}", msg)
            }
            GatewayError::JsonBodyRequired => write!(f, "A JSON request body is required"),
            GatewayError::MissingRequiredArg(arg) => {
                write!(f, "You're missing the required `{}` argument", arg)
            }
            GatewayError::InvalidArgType(arg) => {
                write!(f, "The `{}` argument must be a string", arg)
            }
            GatewayError::Release(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::Release(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReleaseError> for GatewayError {
    fn from(e: ReleaseError) -> Self {
        GatewayError::Release(e)
    }
}

/// `{"title": "400 Bad Request", "description": ...}`
fn error_body(status: StatusCode, description: Option<String>) -> serde_json::Value {
    let title = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };
    match description {
        Some(description) => serde_json::json!({ "title": title, "description": description }),
        None => serde_json::json!({ "title": title }),
    }
}

fn unauthorized() -> HttpResponseBuilder {
    let mut builder = HttpResponse::Unauthorized();
    builder.insert_header((header::WWW_AUTHENTICATE, BASIC_CHALLENGE));
    builder
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            GatewayError::MalformedCredentials(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::JsonBodyRequired => StatusCode::BAD_REQUEST,
            GatewayError::MissingRequiredArg(_) => StatusCode::BAD_REQUEST,
            GatewayError::InvalidArgType(_) => StatusCode::BAD_REQUEST,
            GatewayError::Release(ReleaseError::Unauthorized) => StatusCode::UNAUTHORIZED,
            GatewayError::Release(ReleaseError::InvalidReleaseType(_)) => StatusCode::BAD_REQUEST,
            GatewayError::Release(ReleaseError::NoCommits(_)) => StatusCode::BAD_REQUEST,
            GatewayError::Release(ReleaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            GatewayError::Release(ReleaseError::Generic(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            GatewayError::Release(ReleaseError::Unauthorized) => unauthorized().finish(),
            GatewayError::Release(ReleaseError::NotFound(msg)) => {
                tracing::debug!("Release client reported not found: {}", msg);
                HttpResponse::NotFound().finish()
            }
            GatewayError::Unauthenticated(_) => {
                unauthorized().json(error_body(status, Some(self.to_string())))
            }
            GatewayError::JsonBodyRequired
            | GatewayError::MissingRequiredArg(_)
            | GatewayError::InvalidArgType(_)
            | GatewayError::Release(ReleaseError::InvalidReleaseType(_))
            | GatewayError::Release(ReleaseError::NoCommits(_)) => {
                HttpResponse::build(status).json(error_body(status, Some(self.to_string())))
            }
            GatewayError::MalformedCredentials(_)
            | GatewayError::Release(ReleaseError::Generic(_)) => {
                tracing::error!("Internal error: {}", self);
                HttpResponse::build(status).json(error_body(status, Some(self.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = resp.into_body().try_into_bytes().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn body_is_empty(resp: HttpResponse) -> bool {
        resp.into_body().try_into_bytes().unwrap().is_empty()
    }

    #[test]
    fn missing_arg_message_is_exact() {
        let err = GatewayError::MissingRequiredArg("owner".into());
        assert_eq!(err.to_string(), "You're missing the required `owner` argument");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_unauthorized_is_empty_401() {
        let resp = GatewayError::Release(ReleaseError::Unauthorized).error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            BASIC_CHALLENGE
        );
        assert!(body_is_empty(resp));
    }

    #[test]
    fn upstream_not_found_is_empty_404() {
        let resp = GatewayError::Release(ReleaseError::NotFound("octocat/nope".into()))
            .error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_is_empty(resp));
    }

    #[test]
    fn domain_rejections_are_400_with_message() {
        let resp = GatewayError::Release(ReleaseError::InvalidReleaseType(
            "`huge` is not a valid release type".into(),
        ))
        .error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp);
        assert_eq!(body["title"], "400 Bad Request");
        assert_eq!(body["description"], "`huge` is not a valid release type");

        let resp =
            GatewayError::Release(ReleaseError::NoCommits("nothing to release".into()))
                .error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp)["description"], "nothing to release");
    }

    #[test]
    fn unclassified_errors_are_500_with_message() {
        let resp = GatewayError::Release(ReleaseError::Generic("connection reset".into()))
            .error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp);
        assert_eq!(body["title"], "500 Internal Server Error");
        assert_eq!(body["description"], "connection reset");
    }

    #[test]
    fn unauthenticated_carries_challenge_and_description() {
        let resp = GatewayError::Unauthenticated("Basic auth required").error_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
        assert_eq!(body_json(resp)["description"], "Basic auth required");
    }

    #[test]
    fn json_body_required_is_400() {
        let resp = GatewayError::JsonBodyRequired.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp)["description"],
            "A JSON request body is required"
        );
    }
}

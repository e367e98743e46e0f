//! HTTP Basic credential extraction.
//!
//! [`BasicAuth`] is an extractor: a handler that lists it as a parameter
//! requires credentials, every other handler never looks at the
//! `Authorization` header. This keeps `/` and `/healthcheck` public without
//! a path allowlist.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};
use base64::Engine;
use releasify::Credentials;

use crate::error::GatewayError;
use crate::metrics;

pub const BASIC_PREFIX: &str = "Basic ";

const MISSING_CREDENTIALS: &str = "Please provide a username and password";
const BASIC_REQUIRED: &str = "Basic auth required";

/// Credentials of the caller, decoded from `Authorization: Basic ...`.
#[derive(Debug, Clone)]
pub struct BasicAuth(Credentials);

impl BasicAuth {
    pub fn credentials(&self) -> &Credentials {
        &self.0
    }
}

impl FromRequest for BasicAuth {
    type Error = GatewayError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = req.headers().get(header::AUTHORIZATION).map(|value| {
            // A non-ASCII header can never start with the Basic prefix.
            value.to_str().unwrap_or_default()
        });

        let result = parse_basic_auth(header).map(BasicAuth);
        if let Err(ref e) = result {
            metrics::AUTH_FAILURES
                .with_label_values(&[failure_reason(e)])
                .inc();
            tracing::warn!(path = %req.path(), "Rejected credentials: {}", e);
        }
        ready(result)
    }
}

fn failure_reason(err: &GatewayError) -> &'static str {
    match err {
        GatewayError::Unauthenticated(MISSING_CREDENTIALS) => "missing",
        GatewayError::Unauthenticated(_) => "scheme",
        _ => "malformed",
    }
}

/// Parse a raw `Authorization` header value into credentials.
///
/// Absent or non-Basic headers are authentication failures. A Basic token
/// that does not decode to `user:secret` is a malformed request and surfaces
/// as an internal error.
pub fn parse_basic_auth(header: Option<&str>) -> Result<Credentials, GatewayError> {
    let header = header.ok_or(GatewayError::Unauthenticated(MISSING_CREDENTIALS))?;
    let token = header
        .strip_prefix(BASIC_PREFIX)
        .ok_or(GatewayError::Unauthenticated(BASIC_REQUIRED))?;

    let decoded = decode_token(token.trim())
        .map_err(|e| GatewayError::MalformedCredentials(e.to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|e| GatewayError::MalformedCredentials(e.to_string()))?;

    let (user, secret) = decoded.split_once(':').ok_or_else(|| {
        GatewayError::MalformedCredentials("expected `user:secret`".to_string())
    })?;

    Ok(Credentials::new(user, secret))
}

/// URL-safe alphabet first, standard alphabet as a fallback.
fn decode_token(token: &str) -> Result<Vec<u8>, base64::DecodeError> {
    base64::engine::general_purpose::URL_SAFE
        .decode(token)
        .or_else(|_| base64::engine::general_purpose::STANDARD.decode(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_user_and_secret() {
        let creds = parse_basic_auth(Some("Basic Zm9vOmJhcg==")).unwrap();
        assert_eq!(creds, Credentials::new("foo", "bar"));
    }

    #[test]
    fn accepts_both_base64_alphabets() {
        // "octocat:s3cr3t?>~"
        let url_safe = parse_basic_auth(Some("Basic b2N0b2NhdDpzM2NyM3Q_Pn4=")).unwrap();
        let standard = parse_basic_auth(Some("Basic b2N0b2NhdDpzM2NyM3Q/Pn4=")).unwrap();
        assert_eq!(url_safe, standard);
        assert_eq!(url_safe.secret, "s3cr3t?>~");
    }

    #[test]
    fn splits_on_first_colon_only() {
        // "user:pa:ss"
        let creds = parse_basic_auth(Some("Basic dXNlcjpwYTpzcw==")).unwrap();
        assert_eq!(creds.user, "user");
        assert_eq!(creds.secret, "pa:ss");
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let err = parse_basic_auth(None).unwrap_err();
        assert!(matches!(err, GatewayError::Unauthenticated(MISSING_CREDENTIALS)));
    }

    #[test]
    fn other_schemes_are_unauthenticated() {
        for header in ["Bearer abc", "basic Zm9vOmJhcg==", "Basic", ""] {
            let err = parse_basic_auth(Some(header)).unwrap_err();
            assert!(
                matches!(err, GatewayError::Unauthenticated(BASIC_REQUIRED)),
                "header {header:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn undecodable_tokens_are_malformed() {
        // not base64
        assert!(matches!(
            parse_basic_auth(Some("Basic !!!")).unwrap_err(),
            GatewayError::MalformedCredentials(_)
        ));
        // "nocolon"
        assert!(matches!(
            parse_basic_auth(Some("Basic bm9jb2xvbg==")).unwrap_err(),
            GatewayError::MalformedCredentials(_)
        ));
        // 0xff 0xfe ':' 'x' is not UTF-8
        assert!(matches!(
            parse_basic_auth(Some("Basic __46eA==")).unwrap_err(),
            GatewayError::MalformedCredentials(_)
        ));
    }

    #[test]
    fn failure_reasons_are_labelled() {
        assert_eq!(
            failure_reason(&GatewayError::Unauthenticated(MISSING_CREDENTIALS)),
            "missing"
        );
        assert_eq!(
            failure_reason(&GatewayError::Unauthenticated(BASIC_REQUIRED)),
            "scheme"
        );
        assert_eq!(
            failure_reason(&GatewayError::MalformedCredentials("x".into())),
            "malformed"
        );
    }
}

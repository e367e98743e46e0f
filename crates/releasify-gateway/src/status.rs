use actix_web::http::StatusCode;

/// Translate a release client status code into the response status.
///
/// Only registered HTTP statuses pass through. Anything else, including
/// out-of-range or negative values, becomes 500.
pub fn translate_status(code: i64) -> StatusCode {
    u16::try_from(code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(|status| status.canonical_reason().is_some())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

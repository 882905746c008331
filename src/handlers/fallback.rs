use axum::http::StatusCode;

/// Anything that is not a known route and method. Plain text, unlike every
/// other response.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "not found")
}

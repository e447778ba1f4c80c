//! HTTP response -> [`CloudError`] classification.

use reqwest::StatusCode;
use seedr_core::CloudError;

/// Classify a non-success status code per the error-classification table:
/// 401/403 -> auth, 429 -> rate limited, 5xx -> server error, 404 -> not
/// found, everything else -> protocol error.
#[must_use]
pub fn classify_status(status: StatusCode, operation: &'static str) -> CloudError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CloudError::AuthFailure,
        StatusCode::TOO_MANY_REQUESTS => CloudError::RateLimited,
        StatusCode::NOT_FOUND => CloudError::NotFound,
        status if status.is_server_error() => CloudError::ServerError {
            status: status.as_u16(),
        },
        _ => CloudError::ProtocolError { operation },
    }
}

/// Wrap a transport-level (pre-response) `reqwest` failure.
#[must_use]
pub fn classify_transport(source: reqwest::Error) -> CloudError {
    CloudError::Transport {
        source: Box::new(source),
    }
}

//! API client error types.

use shopfront_core::ErrorInfo;
use thiserror::Error;

/// Errors surfaced by the remote resource client.
///
/// The client performs no retries and no caching; every failure surfaces
/// immediately so the lifecycle machine can record it.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The server answered with a non-2xx status. `detail` is the
    /// human-readable message from the response body's `detail` field
    /// when present, else the HTTP status text.
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// No usable response reached the client.
    #[error("network error: {0}")]
    Transport(String),

    /// The response arrived but its body was not the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// A protected call was attempted without a bearer token. This is a
    /// caller error; no request is sent and nothing is retried.
    #[error("authentication required")]
    MissingToken,

    /// The client itself could not be constructed.
    #[error("client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Normalize into the single-message form stored in request slices.
impl From<ApiError> for ErrorInfo {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Api { status, detail } => ErrorInfo::api(status, detail),
            ApiError::Transport(msg) | ApiError::Decode(msg) => ErrorInfo::transport(msg),
            ApiError::MissingToken => ErrorInfo::client("authentication required"),
            ApiError::Setup(msg) => ErrorInfo::client(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::ErrorKind;

    #[test]
    fn test_api_error_normalizes_to_error_info() {
        let info: ErrorInfo = ApiError::Api {
            status: 401,
            detail: "Invalid token".to_string(),
        }
        .into();
        assert_eq!(info.kind, ErrorKind::Api);
        assert_eq!(info.status, Some(401));
        assert_eq!(info.message, "Invalid token");

        let info: ErrorInfo = ApiError::Transport("connection refused".to_string()).into();
        assert_eq!(info.kind, ErrorKind::Transport);

        let info: ErrorInfo = ApiError::MissingToken.into();
        assert_eq!(info.kind, ErrorKind::Client);
    }
}

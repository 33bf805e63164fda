use serde::Deserialize;
use thiserror::Error;

use crate::model::{ApiError, ErrorCode};

/// Error body of any non-2xx response. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<ErrorCode>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Errors returned by [`CheckoutApi`](super::CheckoutApi) implementations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", .body.message.as_deref().unwrap_or("no message"))]
    Api { status: u16, body: ErrorBody },

    #[error("{0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// Converts the failure into what the user sees.
    ///
    /// An API error body keeps its code (or `UNKNOWN_ERROR` if it has none) and its message
    /// (or `fallback`). Anything else becomes `UNKNOWN_ERROR` with the underlying message.
    pub fn into_api_error(self, fallback: &str) -> ApiError {
        match self {
            ClientError::Api { body, .. } => ApiError {
                code: body.code.unwrap_or(ErrorCode::UnknownError),
                message: body.message.unwrap_or_else(|| fallback.to_string()),
                detail: body.detail,
            },
            other => ApiError::unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_body_keeps_code_message_and_detail() {
        let err = ClientError::Api {
            status: 400,
            body: ErrorBody {
                code: Some(ErrorCode::OutOfStock),
                message: Some("Not enough stock.".to_string()),
                detail: Some("requested 51, available 50".to_string()),
            },
        };
        let mapped = err.into_api_error("Order could not be created.");
        assert_eq!(mapped.code, ErrorCode::OutOfStock);
        assert_eq!(mapped.message, "Not enough stock.");
        assert_eq!(mapped.detail.as_deref(), Some("requested 51, available 50"));
    }

    #[test]
    fn test_empty_body_falls_back() {
        let err = ClientError::Api {
            status: 500,
            body: ErrorBody::default(),
        };
        let mapped = err.into_api_error("Order could not be created.");
        assert_eq!(mapped, ApiError::unknown("Order could not be created."));
    }

    #[test]
    fn test_non_api_failure_is_unknown_error() {
        let mapped = ClientError::UnexpectedResponse("Network Error".to_string())
            .into_api_error("Payment approval failed.");
        assert_eq!(mapped.code, ErrorCode::UnknownError);
        assert_eq!(mapped.message, "Network Error");
    }
}

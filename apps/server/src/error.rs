use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use nbc_fx_core::errors::Error as CoreError;
use thiserror::Error;

/// Body returned when the source URL is not configured
pub const CONFIGURATION_ERROR_MESSAGE: &str = "NBC_MUST_VALID";

/// Body returned for every other failure; details stay in the logs
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing the request.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Core(e) if e.is_configuration() => {
                tracing::error!("Configuration error: {}", e);
                CONFIGURATION_ERROR_MESSAGE
            }
            ApiError::Core(e) => {
                tracing::error!("Request failed: {}", e);
                GENERIC_ERROR_MESSAGE
            }
            ApiError::Timeout(_) | ApiError::Internal(_) => {
                tracing::error!("{}", self);
                GENERIC_ERROR_MESSAGE
            }
        };
        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use nbc_fx_core::fx::FxError;

    #[test]
    fn test_configuration_error_uses_dedicated_body() {
        let response =
            ApiError::from(CoreError::MissingConfigKey("NBC".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = CoreError::from(FxError::FetchError("timed out".to_string()));
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_timeout_uses_generic_body() {
        let response = ApiError::Timeout(Duration::from_millis(50)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], GENERIC_ERROR_MESSAGE.as_bytes());
    }
}

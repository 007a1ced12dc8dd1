use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unique error codes for client identification
#[derive(Debug, Clone, Copy)]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationFailed = 1001,
    MissingField = 1002,

    // Document errors (2xxx)
    ExtractionFailed = 2001,

    // Completion service errors (3xxx)
    CompletionTransport = 3001,
    CompletionApi = 3002,
    CompletionSchema = 3003,

    // Internal errors (9xxx)
    InternalError = 9001,
    ConfigurationError = 9002,
}

impl ErrorCode {
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    // Document errors: fatal to the request, the orchestrator never runs
    #[error("Document extraction failed: {0}")]
    ExtractionError(String),

    // Completion service errors: contained per question by the orchestrator
    #[error("Completion transport error: {0}")]
    CompletionTransportError(String),

    #[error("Completion API error: status {status}: {body}")]
    CompletionApiError { status: u16, body: String },

    #[error("Completion response schema error: {0}")]
    CompletionSchemaError(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ValidationError(_) => ErrorCode::ValidationFailed,
            Self::MissingField(_) => ErrorCode::MissingField,
            Self::ExtractionError(_) => ErrorCode::ExtractionFailed,
            Self::CompletionTransportError(_) => ErrorCode::CompletionTransport,
            Self::CompletionApiError { .. } => ErrorCode::CompletionApi,
            Self::CompletionSchemaError(_) => ErrorCode::CompletionSchema,
            Self::InternalError(_) => ErrorCode::InternalError,
            Self::ConfigError(_) => ErrorCode::ConfigurationError,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::ExtractionError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::CompletionTransportError(_) => StatusCode::BAD_GATEWAY,
            Self::CompletionApiError { .. } => StatusCode::BAD_GATEWAY,
            Self::CompletionSchemaError(_) => StatusCode::BAD_GATEWAY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        // Log based on severity
        match &self {
            AppError::ValidationError(_) | AppError::MissingField(_) => {
                tracing::debug!(error_code = error_code.as_u16(), %message, "Client error");
            }
            AppError::ExtractionError(_) => {
                tracing::info!(error_code = error_code.as_u16(), %message, "Extraction error");
            }
            _ => {
                tracing::error!(error_code = error_code.as_u16(), %message, error = ?self, "Server error");
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code.as_u16(),
                "status": status.as_u16(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_failure_is_unprocessable() {
        let err = AppError::ExtractionError("no text".to_string());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code().as_u16(), 2001);
    }

    #[test]
    fn completion_failures_map_to_bad_gateway() {
        let errors = [
            AppError::CompletionTransportError("connection refused".to_string()),
            AppError::CompletionApiError {
                status: 429,
                body: "quota exceeded".to_string(),
            },
            AppError::CompletionSchemaError("no choices".to_string()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        }
    }
}

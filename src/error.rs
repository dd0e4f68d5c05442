// src/error.rs
//! Library error types

use thiserror::Error;

use crate::types::response::ApiErrorEnvelope;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Required field is blank: personalInfo.{field}")]
    MissingField { field: &'static str },

    #[error("Failed to write DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error while building DOCX: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum OptimizationError {
    #[error("Resume text and job description must both be provided")]
    EmptyInput,

    #[error("Model API rejected the credentials (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Model API rate limit reached: {message}")]
    RateLimited { message: String },

    #[error("Model API unavailable (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Model API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request to model API failed: {0}")]
    Transport(String),

    #[error("Model API did not answer within {0} seconds")]
    Timeout(u64),

    #[error("Model returned no content (finish reason: {finish_reason})")]
    EmptyResponse { finish_reason: String },

    #[error("Model output does not match the response schema at {path}: {reason}")]
    SchemaMismatch { path: String, reason: String },
}

impl OptimizationError {
    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OptimizationError::RateLimited { .. }
                | OptimizationError::Upstream { .. }
                | OptimizationError::Transport(_)
                | OptimizationError::Timeout(_)
        )
    }

    /// Classify a non-success HTTP status returned by the model API
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => OptimizationError::Auth { status, message },
            429 => OptimizationError::RateLimited { message },
            s if s >= 500 => OptimizationError::Upstream { status, message },
            _ => OptimizationError::Api { status, message },
        }
    }

    /// Classify an error response, preferring the API's own error envelope
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) if envelope.error.is_auth_failure() => OptimizationError::Auth {
                status,
                message: envelope.error.message,
            },
            Ok(envelope) => Self::from_status(status, envelope.error.message),
            Err(_) => Self::from_status(status, body.trim().to_string()),
        }
    }

    /// Stable machine-readable code, used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            OptimizationError::EmptyInput => "EMPTY_INPUT",
            OptimizationError::Auth { .. } => "UPSTREAM_AUTH_FAILED",
            OptimizationError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            e if e.is_retryable() => "OPTIMIZATION_UNAVAILABLE",
            _ => "OPTIMIZATION_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            OptimizationError::from_status(401, String::new()),
            OptimizationError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            OptimizationError::from_status(403, String::new()),
            OptimizationError::Auth { .. }
        ));
        assert!(matches!(
            OptimizationError::from_status(429, String::new()),
            OptimizationError::RateLimited { .. }
        ));
        assert!(matches!(
            OptimizationError::from_status(503, String::new()),
            OptimizationError::Upstream { status: 503, .. }
        ));
        assert!(matches!(
            OptimizationError::from_status(400, String::new()),
            OptimizationError::Api { status: 400, .. }
        ));
    }

    #[test]
    fn test_response_classification_uses_envelope() {
        let invalid_key = r#"{"error": {"code": 400, "message": "API key not valid.",
            "status": "INVALID_ARGUMENT", "details": [{"reason": "API_KEY_INVALID"}]}}"#;
        let err = OptimizationError::from_response(400, invalid_key);
        assert!(matches!(err, OptimizationError::Auth { status: 400, ref message } if message == "API key not valid."));
        assert_eq!(err.code(), "UPSTREAM_AUTH_FAILED");

        let bad_request = r#"{"error": {"code": 400, "message": "bad schema", "status": "INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            OptimizationError::from_response(400, bad_request),
            OptimizationError::Api { status: 400, ref message } if message == "bad schema"
        ));

        assert!(matches!(
            OptimizationError::from_response(502, "<html>Bad Gateway</html>\n"),
            OptimizationError::Upstream { status: 502, ref message } if message == "<html>Bad Gateway</html>"
        ));
    }

    #[test]
    fn test_only_transient_errors_are_retryable() {
        assert!(OptimizationError::Timeout(120).is_retryable());
        assert!(OptimizationError::Transport("reset".into()).is_retryable());
        assert!(OptimizationError::from_status(500, String::new()).is_retryable());

        assert!(!OptimizationError::EmptyInput.is_retryable());
        assert!(!OptimizationError::from_status(401, String::new()).is_retryable());
        assert!(!OptimizationError::EmptyResponse {
            finish_reason: "STOP".into()
        }
        .is_retryable());
        assert!(!OptimizationError::SchemaMismatch {
            path: "$.atsScore".into(),
            reason: "expected number".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(OptimizationError::EmptyInput.code(), "EMPTY_INPUT");
        assert_eq!(
            OptimizationError::from_status(429, String::new()).code(),
            "OPTIMIZATION_UNAVAILABLE"
        );
        assert_eq!(
            OptimizationError::from_status(404, String::new()).code(),
            "OPTIMIZATION_FAILED"
        );
    }

    #[test]
    fn test_empty_response_message_includes_reason() {
        let err = OptimizationError::EmptyResponse {
            finish_reason: "SAFETY".into(),
        };
        assert_eq!(
            err.to_string(),
            "Model returned no content (finish reason: SAFETY)"
        );
    }
}

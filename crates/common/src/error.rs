//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Invalid`] → 422
/// - [`ServiceError::Downstream`] → 502
/// - [`ServiceError::Unavailable`] → 503
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body could not be read — malformed JSON or an unknown enum spelling.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The request parsed but failed parameter validation. Carries the joined issue text.
    #[error("{0}")]
    Invalid(String),

    /// The cipher service answered with an error. The message is its own, unmodified.
    #[error("{0}")]
    Downstream(String),

    /// The cipher service could not be reached or did not answer in time.
    #[error("cipher service unavailable: {0}")]
    Unavailable(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Invalid(_) => 422,
            ServiceError::Downstream(_) => 502,
            ServiceError::Unavailable(_) => 503,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code placed in the error body.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Invalid(_) => "invalid_request",
            ServiceError::Downstream(_) => "cipher_service_error",
            ServiceError::Unavailable(_) => "service_unavailable",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).http_status(), 400);
        assert_eq!(ServiceError::Invalid("x".into()).http_status(), 422);
        assert_eq!(ServiceError::Downstream("x".into()).http_status(), 502);
        assert_eq!(ServiceError::Unavailable("x".into()).http_status(), 503);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn downstream_message_passes_through_unmodified() {
        let e = ServiceError::Downstream("Given final block not properly padded".into());
        assert_eq!(e.to_string(), "Given final block not properly padded");
        assert_eq!(e.code(), "cipher_service_error");
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::BadRequest("unknown mode: XTS".into());
        assert!(e.to_string().contains("unknown mode: XTS"));
    }
}

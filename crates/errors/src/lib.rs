//! errors - 统一错误处理
//!
//! Every failure the connector reports is an [`AppError`]: a human readable
//! message, the original error as `cause`, a coarse [`ErrorKind`] and an
//! [`ErrorDetails`] record with whatever diagnostics the remote service sent.

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed underlying error.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request was rejected before or by the service as malformed.
    Validation,
    NotFound,
    Unauthenticated,
    Forbidden,
    Throttling,
    /// Network level failure: timeout, connection refused, dispatch failure.
    Transport,
    /// The service answered with an error we do not classify further.
    ExternalService,
}

impl ErrorKind {
    /// Whether a caller may reasonably retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Throttling | Self::Transport | Self::ExternalService)
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::Unauthenticated => 401,
            Self::Forbidden => 403,
            Self::Throttling => 429,
            Self::Transport => 503,
            Self::ExternalService => 502,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::NotFound => "not found",
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::Throttling => "throttling",
            Self::Transport => "transport",
            Self::ExternalService => "external service",
        };
        f.write_str(name)
    }
}

/// Diagnostics extracted from a service-level error.
///
/// Empty when the failure did not come from the service (network fault,
/// local validation). An empty record does not mean the call succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ErrorDetails {
    pub fn is_empty(&self) -> bool {
        self.http_status_code.is_none()
            && self.http_status_text.is_none()
            && self.error_code.is_none()
            && self.error_message.is_none()
    }
}

/// Local precondition failure, raised before any request leaves the process.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InvalidRequest(pub String);

/// 应用错误类型
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    #[source]
    cause: BoxError,
    details: ErrorDetails,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: cause.into(),
            details: ErrorDetails::default(),
        }
    }

    /// Precondition violation; the message doubles as the cause.
    pub fn validation(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        Self::new(ErrorKind::Validation, msg.clone(), InvalidRequest(msg))
    }

    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = details;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause.as_ref()
    }

    pub fn details(&self) -> &ErrorDetails {
        &self.details
    }

    /// HTTP status reported by the service, if the failure came from it.
    pub fn http_status_code(&self) -> Option<u16> {
        self.details.http_status_code
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            kind: self.kind,
            status: self.details.http_status_code.unwrap_or_else(|| self.kind.status_code()),
            detail: self.message.clone(),
            details: self.details.clone(),
        }
    }
}

/// Structured rendering of an [`AppError`] for callers that exchange errors as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    pub kind: ErrorKind,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "ErrorDetails::is_empty", default)]
    pub details: ErrorDetails,
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_validation_error_has_cause_and_empty_details() {
        let err = AppError::validation("secretId must not be empty");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "secretId must not be empty");
        assert_eq!(err.cause().to_string(), "secretId must not be empty");
        assert!(err.details().is_empty());
        assert!(err.http_status_code().is_none());
    }

    #[test]
    fn test_source_is_the_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = AppError::new(ErrorKind::Transport, "Error occurred: refused", io);
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "refused");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(ErrorKind::Throttling.is_retryable());
        assert!(ErrorKind::Transport.is_retryable());
        assert!(!ErrorKind::NotFound.is_retryable());
        assert!(!ErrorKind::Validation.is_retryable());
        assert!(!ErrorKind::Forbidden.is_retryable());
    }

    #[test]
    fn test_details_serialize_without_absent_fields() {
        let details = ErrorDetails {
            http_status_code: Some(400),
            error_code: Some("ResourceNotFoundException".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "httpStatusCode": 400,
                "errorCode": "ResourceNotFoundException"
            })
        );
    }

    #[test]
    fn test_problem_details_prefers_service_status() {
        let err = AppError::new(ErrorKind::NotFound, "missing", InvalidRequest("x".into()))
            .with_details(ErrorDetails {
                http_status_code: Some(400),
                ..Default::default()
            });
        let problem = err.to_problem_details();
        assert_eq!(problem.status, 400);
        assert_eq!(problem.kind, ErrorKind::NotFound);

        let local = AppError::validation("bad").to_problem_details();
        assert_eq!(local.status, 400);
        assert!(local.details.is_empty());
    }
}

//! Error normalization for Secrets Manager calls
//!
//! Every SDK failure leaves this crate as an [`AppError`] built here. Service
//! errors carry the HTTP status and the service error code/message in
//! [`ErrorDetails`]; transport and local failures get an empty record.

use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use errors::{AppError, BoxError, ErrorDetails, ErrorKind};

/// Convert an SDK error into an [`AppError`] whose message is
/// `"<context>: <cause message>"`.
pub fn normalize<E>(context: &str, err: SdkError<E, HttpResponse>) -> AppError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let details = error_details(&err);
    let kind = classify(&err, &details);
    let message = format!("{}: {}", context, DisplayErrorContext(&err));
    AppError::new(kind, message, err).with_details(details)
}

/// Wrap a client construction or teardown failure.
pub fn lifecycle_error(context: &str, kind: ErrorKind, cause: impl Into<BoxError>) -> AppError {
    let cause = cause.into();
    AppError::new(kind, format!("{}: {}", context, cause), cause)
}

/// Extract diagnostics; only service errors produce a non-empty record.
pub fn error_details<E>(err: &SdkError<E, HttpResponse>) -> ErrorDetails
where
    E: ProvideErrorMetadata,
{
    match err {
        SdkError::ServiceError(context) => {
            let status = context.raw().status().as_u16();
            ErrorDetails {
                http_status_code: Some(status),
                http_status_text: http::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|code| code.canonical_reason())
                    .map(str::to_owned),
                error_code: context.err().code().map(str::to_owned),
                error_message: context.err().message().map(str::to_owned),
            }
        }
        _ => ErrorDetails::default(),
    }
}

fn classify<E>(err: &SdkError<E, HttpResponse>, details: &ErrorDetails) -> ErrorKind {
    match err {
        SdkError::ServiceError(_) => {
            classify_service_error(details.error_code.as_deref(), details.http_status_code)
        }
        SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) => ErrorKind::Transport,
        SdkError::ConstructionFailure(_) => ErrorKind::Validation,
        // unparseable response
        _ => ErrorKind::ExternalService,
    }
}

/// Map a service error code, falling back to the HTTP status.
pub fn classify_service_error(code: Option<&str>, status: Option<u16>) -> ErrorKind {
    match code {
        Some("ResourceNotFoundException") => ErrorKind::NotFound,
        Some("AccessDeniedException") => ErrorKind::Forbidden,
        Some(
            "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "ExpiredTokenException"
            | "IncompleteSignature"
            | "MissingAuthenticationToken",
        ) => ErrorKind::Unauthenticated,
        Some("ThrottlingException" | "TooManyRequestsException" | "RequestLimitExceeded") => {
            ErrorKind::Throttling
        }
        Some(
            "InvalidParameterException"
            | "InvalidRequestException"
            | "InvalidNextTokenException"
            | "ValidationException",
        ) => ErrorKind::Validation,
        Some("DecryptionFailure" | "InternalServiceError") => ErrorKind::ExternalService,
        _ => match status {
            Some(401) => ErrorKind::Unauthenticated,
            Some(403) => ErrorKind::Forbidden,
            Some(404) => ErrorKind::NotFound,
            Some(429) => ErrorKind::Throttling,
            Some(400..=499) => ErrorKind::Validation,
            _ => ErrorKind::ExternalService,
        },
    }
}

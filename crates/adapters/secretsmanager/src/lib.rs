//! adapter-secretsmanager - AWS Secrets Manager adapter
//!
//! Exposes `GetSecretValue`, `BatchGetSecretValue` and `DescribeSecret` as
//! typed, serde-serializable values. Transport, signing and retries stay with
//! `aws-sdk-secretsmanager`; this crate only:
//! - resolves static credentials into the SDK client
//! - translates requests into SDK operation inputs
//! - translates SDK outputs into response records, eliding absent fields
//! - normalizes every SDK failure into an [`errors::AppError`]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod request;
pub mod response;

pub use client::{SecretManager, SecretsManagerClient};
pub use crate::config::{AuthConfig, SecretsManagerConfig};
pub use errors::{AppError, AppResult, ErrorDetails, ErrorKind};
pub use request::{BatchGetSecretValueRequest, Filter, GetSecretValueRequest};
pub use response::{
    ApiError, BatchGetSecretValueResponse, DescribeSecretResponse, ReplicationStatus,
    RotationRules, SecretPayload, SecretValue, Tag,
};

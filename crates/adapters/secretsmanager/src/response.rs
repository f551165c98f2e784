//! Response records and their translation from SDK operation outputs
//!
//! A field is present only when the service sent it: scalars map to
//! `Option`, and lists that came back empty are dropped. Two exceptions:
//! `rotation_enabled` defaults to `false`, and a secret value always carries
//! its (possibly empty) `version_stages`.

use std::collections::BTreeMap;
use std::fmt;

use aws_sdk_secretsmanager::operation::batch_get_secret_value::BatchGetSecretValueOutput;
use aws_sdk_secretsmanager::operation::describe_secret::DescribeSecretOutput;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueOutput;
use aws_sdk_secretsmanager::primitives::{Blob, DateTime};
use aws_sdk_secretsmanager::types::{
    ApiErrorType, ReplicationStatusType, RotationRulesType, SecretValueEntry, Tag as SdkTag,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

pub type Timestamp = chrono::DateTime<Utc>;

/// Metadata of a secret, as returned by `DescribeSecret`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeSecretResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_rotated_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_rotation_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owning_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication_status: Option<Vec<ReplicationStatus>>,
    #[serde(default)]
    pub rotation_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_lambda_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_rules: Option<RotationRules>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    /// Version id to staging labels. A version without labels maps to `[]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_to_stages: Option<BTreeMap<String, Vec<String>>>,
}

/// Replication state of a secret in one replica region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// `InSync`, `Failed` or `InProgress`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automatically_after_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_expression: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Decrypted secret material.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SecretPayload {
    Binary(Vec<u8>),
    Text(String),
}

impl SecretPayload {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Binary(bytes) => bytes,
            Self::Text(text) => text.as_bytes(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Binary(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Binary(bytes) => bytes,
            Self::Text(text) => text.into_bytes(),
        }
    }
}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(bytes) => write!(f, "Binary([REDACTED; {} bytes])", bytes.len()),
            Self::Text(_) => f.write_str("Text([REDACTED])"),
        }
    }
}

/// One version of a secret, from `GetSecretValue` or a `BatchGetSecretValue` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<SecretPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(default)]
    pub version_stages: Vec<String>,
}

/// Per-secret failure reported inside a successful batch response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetSecretValueResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_values: Option<Vec<SecretValue>>,
}

/// Common shape of `GetSecretValueOutput` and `SecretValueEntry`.
struct RawSecretValue {
    arn: Option<String>,
    created_date: Option<DateTime>,
    name: Option<String>,
    secret_binary: Option<Blob>,
    secret_string: Option<String>,
    version_id: Option<String>,
    version_stages: Option<Vec<String>>,
}

impl From<GetSecretValueOutput> for RawSecretValue {
    fn from(output: GetSecretValueOutput) -> Self {
        Self {
            arn: output.arn,
            created_date: output.created_date,
            name: output.name,
            secret_binary: output.secret_binary,
            secret_string: output.secret_string,
            version_id: output.version_id,
            version_stages: output.version_stages,
        }
    }
}

impl From<SecretValueEntry> for RawSecretValue {
    fn from(entry: SecretValueEntry) -> Self {
        Self {
            arn: entry.arn,
            created_date: entry.created_date,
            name: entry.name,
            secret_binary: entry.secret_binary,
            secret_string: entry.secret_string,
            version_id: entry.version_id,
            version_stages: entry.version_stages,
        }
    }
}

/// Convert an SDK timestamp, keeping sub-second precision.
pub fn to_timestamp(date: DateTime) -> Option<Timestamp> {
    chrono::DateTime::from_timestamp(date.secs(), date.subsec_nanos())
}

fn non_empty<T>(items: Option<Vec<T>>) -> Option<Vec<T>> {
    items.filter(|items| !items.is_empty())
}

pub fn from_describe_secret_output(output: DescribeSecretOutput) -> DescribeSecretResponse {
    DescribeSecretResponse {
        arn: output.arn,
        created_date: output.created_date.and_then(to_timestamp),
        deleted_date: output.deleted_date.and_then(to_timestamp),
        description: output.description,
        kms_key_id: output.kms_key_id,
        last_accessed_date: output.last_accessed_date.and_then(to_timestamp),
        last_changed_date: output.last_changed_date.and_then(to_timestamp),
        last_rotated_date: output.last_rotated_date.and_then(to_timestamp),
        name: output.name,
        next_rotation_date: output.next_rotation_date.and_then(to_timestamp),
        owning_service: output.owning_service,
        primary_region: output.primary_region,
        replication_status: non_empty(output.replication_status)
            .map(|items| items.into_iter().map(from_replication_status).collect()),
        rotation_enabled: output.rotation_enabled.unwrap_or(false),
        rotation_lambda_arn: output.rotation_lambda_arn,
        rotation_rules: output.rotation_rules.map(from_rotation_rules),
        tags: non_empty(output.tags).map(|items| items.into_iter().map(from_tag).collect()),
        version_to_stages: output
            .version_ids_to_stages
            .filter(|versions| !versions.is_empty())
            .map(|versions| versions.into_iter().collect()),
    }
}

pub fn from_replication_status(status: ReplicationStatusType) -> ReplicationStatus {
    ReplicationStatus {
        kms_key_id: status.kms_key_id,
        last_accessed_date: status.last_accessed_date.and_then(to_timestamp),
        region: status.region,
        status: status.status.map(|code| code.as_str().to_owned()),
        status_message: status.status_message,
    }
}

pub fn from_rotation_rules(rules: RotationRulesType) -> RotationRules {
    RotationRules {
        automatically_after_days: rules.automatically_after_days,
        duration: rules.duration,
        schedule_expression: rules.schedule_expression,
    }
}

pub fn from_tag(tag: SdkTag) -> Tag {
    Tag {
        key: tag.key,
        value: tag.value,
    }
}

fn to_secret_value(raw: RawSecretValue) -> SecretValue {
    // binary wins when the service sent both forms
    let value = match (raw.secret_binary, raw.secret_string) {
        (Some(binary), _) => Some(SecretPayload::Binary(binary.into_inner())),
        (None, Some(text)) => Some(SecretPayload::Text(text)),
        (None, None) => None,
    };
    SecretValue {
        arn: raw.arn,
        created_date: raw.created_date.and_then(to_timestamp),
        name: raw.name,
        value,
        version_id: raw.version_id,
        version_stages: raw.version_stages.unwrap_or_default(),
    }
}

pub fn from_get_secret_value_output(output: GetSecretValueOutput) -> SecretValue {
    to_secret_value(output.into())
}

pub fn from_secret_value_entry(entry: SecretValueEntry) -> SecretValue {
    to_secret_value(entry.into())
}

pub fn from_batch_get_secret_value_output(
    output: BatchGetSecretValueOutput,
) -> BatchGetSecretValueResponse {
    BatchGetSecretValueResponse {
        errors: non_empty(output.errors)
            .map(|items| items.into_iter().map(from_api_error).collect()),
        next_token: output.next_token,
        secret_values: non_empty(output.secret_values)
            .map(|items| items.into_iter().map(from_secret_value_entry).collect()),
    }
}

pub fn from_api_error(error: ApiErrorType) -> ApiError {
    ApiError {
        error_code: error.error_code,
        message: error.message,
        secret_id: error.secret_id,
    }
}

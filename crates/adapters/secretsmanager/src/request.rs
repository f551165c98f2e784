//! Request records and their translation into SDK operation inputs

use aws_sdk_secretsmanager::operation::batch_get_secret_value::BatchGetSecretValueInput;
use aws_sdk_secretsmanager::operation::describe_secret::DescribeSecretInput;
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueInput;
use aws_sdk_secretsmanager::types::{Filter as SdkFilter, FilterNameStringType};
use errors::{AppError, AppResult, ErrorKind};
use serde::{Deserialize, Serialize};

/// Parameters of `GetSecretValue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSecretValueRequest {
    /// ARN or name of the secret
    pub secret_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    /// Staging label such as `AWSCURRENT` or `AWSPENDING`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_stage: Option<String>,
}

impl GetSecretValueRequest {
    pub fn new(secret_id: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            version_id: None,
            version_stage: None,
        }
    }

    pub fn with_version_id(mut self, version_id: impl Into<String>) -> Self {
        self.version_id = Some(version_id.into());
        self
    }

    pub fn with_version_stage(mut self, version_stage: impl Into<String>) -> Self {
        self.version_stage = Some(version_stage.into());
        self
    }
}

/// Parameters of `BatchGetSecretValue`.
///
/// Secrets are selected either by `filters` or by `secret_ids`. When both are
/// set the filters win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetSecretValueRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl BatchGetSecretValueRequest {
    pub fn for_secret_ids<I, S>(secret_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            secret_ids: Some(secret_ids.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn for_filters(filters: Vec<Filter>) -> Self {
        Self {
            filters: Some(filters),
            ..Default::default()
        }
    }

    pub fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn with_next_token(mut self, next_token: impl Into<String>) -> Self {
        self.next_token = Some(next_token.into());
        self
    }
}

/// Secret filter. `key` is a service filter name: `description`, `name`,
/// `tag-key`, `tag-value`, `primary-region`, `owning-service` or `all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

impl Filter {
    pub fn new<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: Some(key.into()),
            values: Some(values.into_iter().map(Into::into).collect()),
        }
    }
}

fn require_secret_id(secret_id: &str) -> AppResult<()> {
    if secret_id.trim().is_empty() {
        return Err(AppError::validation("`secretId` must not be empty"));
    }
    Ok(())
}

fn build_error(operation: &str, err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::new(
        ErrorKind::Validation,
        format!("Invalid {} request: {}", operation, err),
        err,
    )
}

/// Translate a `GetSecretValue` request.
///
/// Version id and version stage go to their own SDK fields.
pub fn to_get_secret_value_input(request: &GetSecretValueRequest) -> AppResult<GetSecretValueInput> {
    require_secret_id(&request.secret_id)?;
    GetSecretValueInput::builder()
        .secret_id(request.secret_id.as_str())
        .set_version_id(request.version_id.clone())
        .set_version_stage(request.version_stage.clone())
        .build()
        .map_err(|e| build_error("get secret value", e))
}

/// Translate a `BatchGetSecretValue` request.
pub fn to_batch_get_secret_value_input(
    request: &BatchGetSecretValueRequest,
) -> AppResult<BatchGetSecretValueInput> {
    let builder = BatchGetSecretValueInput::builder();
    let builder = match (&request.filters, &request.secret_ids) {
        (Some(filters), _) => builder.set_filters(Some(filters.iter().map(to_filter).collect())),
        (None, Some(secret_ids)) => builder.set_secret_id_list(Some(secret_ids.clone())),
        (None, None) => {
            return Err(AppError::validation(
                "either `filters` or `secretIds` must be provided",
            ));
        }
    };
    builder
        .set_max_results(request.max_results)
        .set_next_token(request.next_token.clone())
        .build()
        .map_err(|e| build_error("batch get secret value", e))
}

/// Translate a filter; absent fields stay unset.
pub fn to_filter(filter: &Filter) -> SdkFilter {
    SdkFilter::builder()
        .set_key(filter.key.as_deref().map(FilterNameStringType::from))
        .set_values(filter.values.clone())
        .build()
}

/// Translate a `DescribeSecret` request.
pub fn to_describe_secret_input(secret_id: &str) -> AppResult<DescribeSecretInput> {
    require_secret_id(secret_id)?;
    DescribeSecretInput::builder()
        .secret_id(secret_id)
        .build()
        .map_err(|e| build_error("describe secret", e))
}

//! Secrets Manager client implementation

use std::time::Instant;

use async_trait::async_trait;
use aws_sdk_secretsmanager::config::BehaviorVersion;
use aws_sdk_secretsmanager::Client;
use aws_types::region::Region;
use errors::{AppResult, ErrorKind, InvalidRequest};
use tracing::{debug, info, warn};

use crate::config::SecretsManagerConfig;
use crate::credentials;
use crate::error::{lifecycle_error, normalize};
use crate::metrics::{record_request, BATCH_GET_SECRET_VALUE, DESCRIBE_SECRET, GET_SECRET_VALUE};
use crate::request::{
    to_batch_get_secret_value_input, to_describe_secret_input, to_get_secret_value_input,
    BatchGetSecretValueRequest, GetSecretValueRequest,
};
use crate::response::{
    from_batch_get_secret_value_output, from_describe_secret_output,
    from_get_secret_value_output, BatchGetSecretValueResponse, DescribeSecretResponse,
    SecretValue,
};

const INIT_ERROR: &str = "Error occurred while initializing the AWS secret manager client";
const GET_SECRET_VALUE_ERROR: &str = "Error occurred while retrieving the secret value";
const BATCH_GET_SECRET_VALUE_ERROR: &str = "Error occurred while retrieving the batch secret values";
const DESCRIBE_SECRET_ERROR: &str = "Error occurred while describing the secret";

/// AWS Secrets Manager client
///
/// Cheap to clone; clones share the SDK client and its connection pool.
#[derive(Debug, Clone)]
pub struct SecretsManagerClient {
    client: Client,
}

impl SecretsManagerClient {
    /// Create a new client bound to the configured region and credentials
    pub fn new(config: SecretsManagerConfig) -> AppResult<Self> {
        info!("Creating AWS Secrets Manager client for region {}", config.region);

        validate_region(&config.region)
            .map_err(|e| lifecycle_error(INIT_ERROR, ErrorKind::Validation, e))?;
        if let Some(endpoint) = config.endpoint_url.as_deref() {
            validate_endpoint(endpoint)
                .map_err(|e| lifecycle_error(INIT_ERROR, ErrorKind::Validation, e))?;
        }

        let credentials = credentials::resolve(&config.auth);
        let mut builder = aws_sdk_secretsmanager::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(credentials);
        if let Some(endpoint) = config.endpoint_url {
            debug!("Using Secrets Manager endpoint override {}", endpoint);
            builder = builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(builder.build());
        info!("AWS Secrets Manager client created");

        Ok(Self { client })
    }

    /// Wrap an SDK client built elsewhere, e.g. from a shared `SdkConfig`
    pub fn from_sdk_client(client: Client) -> Self {
        Self { client }
    }

    /// Release the underlying SDK client.
    ///
    /// Dropping the last clone tears down the connection pool. The SDK
    /// reports no error on that path, so unlike [`Self::new`] there is no
    /// "Error occurred while closing the AWS secret manager client" failure
    /// to normalize and this always returns `Ok`.
    pub fn close(self) -> AppResult<()> {
        let Self { client } = self;
        drop(client);
        info!("AWS Secrets Manager client closed");
        Ok(())
    }

    /// Get a secret value
    pub async fn get_secret_value(&self, request: &GetSecretValueRequest) -> AppResult<SecretValue> {
        debug!("Getting secret value for {}", request.secret_id);
        let input = to_get_secret_value_input(request)?;

        let started = Instant::now();
        let result = self
            .client
            .get_secret_value()
            .set_secret_id(input.secret_id)
            .set_version_id(input.version_id)
            .set_version_stage(input.version_stage)
            .send()
            .await;
        record_request(GET_SECRET_VALUE, result.is_ok(), started);

        match result {
            Ok(output) => {
                debug!("Successfully retrieved secret value for {}", request.secret_id);
                Ok(from_get_secret_value_output(output))
            }
            Err(e) => {
                let err = normalize(GET_SECRET_VALUE_ERROR, e);
                warn!("Failed to get secret value for {}: {}", request.secret_id, err);
                Err(err)
            }
        }
    }

    /// Get several secret values in one call
    pub async fn batch_get_secret_value(
        &self,
        request: &BatchGetSecretValueRequest,
    ) -> AppResult<BatchGetSecretValueResponse> {
        debug!("Batch getting secret values");
        let input = to_batch_get_secret_value_input(request)?;

        let started = Instant::now();
        let result = self
            .client
            .batch_get_secret_value()
            .set_secret_id_list(input.secret_id_list)
            .set_filters(input.filters)
            .set_max_results(input.max_results)
            .set_next_token(input.next_token)
            .send()
            .await;
        record_request(BATCH_GET_SECRET_VALUE, result.is_ok(), started);

        match result {
            Ok(output) => {
                let response = from_batch_get_secret_value_output(output);
                debug!(
                    "Batch returned {} secret values and {} errors",
                    response.secret_values.as_ref().map_or(0, Vec::len),
                    response.errors.as_ref().map_or(0, Vec::len)
                );
                Ok(response)
            }
            Err(e) => {
                let err = normalize(BATCH_GET_SECRET_VALUE_ERROR, e);
                warn!("Failed to batch get secret values: {}", err);
                Err(err)
            }
        }
    }

    /// Describe a secret without reading its value
    pub async fn describe_secret(&self, secret_id: &str) -> AppResult<DescribeSecretResponse> {
        debug!("Describing secret {}", secret_id);
        let input = to_describe_secret_input(secret_id)?;

        let started = Instant::now();
        let result = self
            .client
            .describe_secret()
            .set_secret_id(input.secret_id)
            .send()
            .await;
        record_request(DESCRIBE_SECRET, result.is_ok(), started);

        match result {
            Ok(output) => Ok(from_describe_secret_output(output)),
            Err(e) => {
                let err = normalize(DESCRIBE_SECRET_ERROR, e);
                warn!("Failed to describe secret {}: {}", secret_id, err);
                Err(err)
            }
        }
    }
}

/// Region ids look like `us-east-1`, `eu-central-2` or `us-gov-west-1`.
fn validate_region(region: &str) -> Result<(), InvalidRequest> {
    let well_formed = !region.is_empty()
        && !region.starts_with('-')
        && !region.ends_with('-')
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(InvalidRequest(format!("invalid region `{}`", region)))
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), InvalidRequest> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(InvalidRequest(format!("invalid endpoint url `{}`", endpoint)))
    }
}

/// Secret manager trait for abstraction
#[async_trait]
pub trait SecretManager: Send + Sync {
    /// Get a secret value
    async fn get_secret_value(&self, request: &GetSecretValueRequest) -> AppResult<SecretValue>;

    /// Get several secret values
    async fn batch_get_secret_value(
        &self,
        request: &BatchGetSecretValueRequest,
    ) -> AppResult<BatchGetSecretValueResponse>;

    /// Describe a secret
    async fn describe_secret(&self, secret_id: &str) -> AppResult<DescribeSecretResponse>;
}

#[async_trait]
impl SecretManager for SecretsManagerClient {
    async fn get_secret_value(&self, request: &GetSecretValueRequest) -> AppResult<SecretValue> {
        self.get_secret_value(request).await
    }

    async fn batch_get_secret_value(
        &self,
        request: &BatchGetSecretValueRequest,
    ) -> AppResult<BatchGetSecretValueResponse> {
        self.batch_get_secret_value(request).await
    }

    async fn describe_secret(&self, secret_id: &str) -> AppResult<DescribeSecretResponse> {
        self.describe_secret(secret_id).await
    }
}

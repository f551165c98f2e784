//! Integration tests for the Secrets Manager adapter
//!
//! These tests talk to a real AWS account and need:
//! - AWS_REGION, AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY
//! - AWS_SESSION_TOKEN when using temporary credentials
//! - SECRET_ID naming an existing secret readable by those credentials

use adapter_secretsmanager::config::SecretsManagerConfigBuilder;
use adapter_secretsmanager::{
    BatchGetSecretValueRequest, ErrorKind, GetSecretValueRequest, SecretsManagerClient,
};

fn live_client() -> SecretsManagerClient {
    let mut builder = SecretsManagerConfigBuilder::new(
        std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
    )
    .with_static_credentials(
        std::env::var("AWS_ACCESS_KEY_ID").expect("AWS_ACCESS_KEY_ID not set"),
        std::env::var("AWS_SECRET_ACCESS_KEY").expect("AWS_SECRET_ACCESS_KEY not set"),
    );
    if let Ok(token) = std::env::var("AWS_SESSION_TOKEN") {
        builder = builder.with_session_token(token);
    }

    SecretsManagerClient::new(builder.build()).expect("Failed to create Secrets Manager client")
}

fn secret_id() -> String {
    std::env::var("SECRET_ID").expect("SECRET_ID not set")
}

#[tokio::test]
#[ignore] // Requires AWS credentials
async fn test_read_and_describe_secret() {
    let client = live_client();
    let secret_id = secret_id();

    // Test 1: Current version
    let secret = client
        .get_secret_value(&GetSecretValueRequest::new(&secret_id))
        .await
        .expect("Failed to read secret");
    assert!(secret.value.is_some());
    assert!(secret.version_stages.iter().any(|s| s == "AWSCURRENT"));

    // Test 2: Same version addressed by id
    let version_id = secret.version_id.clone().expect("version id");
    let by_version = client
        .get_secret_value(&GetSecretValueRequest::new(&secret_id).with_version_id(&version_id))
        .await
        .expect("Failed to read secret by version id");
    assert_eq!(by_version.value, secret.value);

    // Test 3: Metadata
    let described = client
        .describe_secret(&secret_id)
        .await
        .expect("Failed to describe secret");
    assert_eq!(described.arn, secret.arn);
    let stages = described.version_to_stages.expect("version stages");
    assert!(stages.contains_key(&version_id));

    // Test 4: Batch
    let batch = client
        .batch_get_secret_value(&BatchGetSecretValueRequest::for_secret_ids([secret_id.as_str()]))
        .await
        .expect("Failed to batch read secrets");
    assert_eq!(batch.secret_values.map(|v| v.len()), Some(1));

    client.close().expect("Failed to close client");
}

#[tokio::test]
#[ignore] // Requires AWS credentials
async fn test_missing_secret() {
    let client = live_client();

    let err = client
        .get_secret_value(&GetSecretValueRequest::new("this/secret/does/not/exist"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.details().http_status_code, Some(400));
    assert_eq!(err.details().error_code.as_deref(), Some("ResourceNotFoundException"));
}

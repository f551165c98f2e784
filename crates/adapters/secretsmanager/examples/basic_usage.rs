//! Basic usage example for adapter-secretsmanager
//!
//! Run with:
//! ```bash
//! export APP_AWS__REGION=us-east-1
//! export APP_AWS__AUTH__ACCESS_KEY_ID=your-access-key-id
//! export APP_AWS__AUTH__SECRET_ACCESS_KEY=your-secret-access-key
//! cargo run --example basic_usage -- my/secret
//! ```

use adapter_secretsmanager::{
    BatchGetSecretValueRequest, GetSecretValueRequest, SecretManager, SecretPayload,
    SecretsManagerClient, SecretsManagerConfig,
};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::AppConfig::load("config").context("Failed to load configuration")?;
    telemetry::init(&cfg.telemetry.log_level, cfg.telemetry.json);
    let metrics = telemetry::init_metrics()?;

    let secret_id = std::env::args().nth(1).unwrap_or_else(|| "my/secret".to_string());

    println!("=== Secrets Manager Adapter Basic Usage Example ===\n");

    // 1. Create client
    println!("1. Creating client for region {}...", cfg.aws.region);
    let client = SecretsManagerClient::new(SecretsManagerConfig::from(cfg.aws))?;
    let manager: &dyn SecretManager = &client;

    // 2. Read current value
    println!("\n2. Reading {}...", secret_id);
    match manager.get_secret_value(&GetSecretValueRequest::new(&secret_id)).await {
        Ok(secret) => {
            match &secret.value {
                Some(SecretPayload::Text(text)) => println!("   ✓ String secret, {} chars", text.len()),
                Some(SecretPayload::Binary(bytes)) => println!("   ✓ Binary secret, {} bytes", bytes.len()),
                None => println!("   ✓ Secret has no value"),
            }
            println!("   Version: {:?} {:?}", secret.version_id, secret.version_stages);
        }
        Err(e) => println!("   ✗ {} ({:?})", e, e.details()),
    }

    // 3. Describe
    println!("\n3. Describing {}...", secret_id);
    match manager.describe_secret(&secret_id).await {
        Ok(described) => {
            println!("   ARN: {:?}", described.arn);
            println!("   Rotation enabled: {}", described.rotation_enabled);
            println!("   Versions: {:?}", described.version_to_stages);
        }
        Err(e) => println!("   ✗ {}", e),
    }

    // 4. Batch
    println!("\n4. Batch reading {}...", secret_id);
    let batch = manager
        .batch_get_secret_value(&BatchGetSecretValueRequest::for_secret_ids([secret_id.as_str()]))
        .await;
    match batch {
        Ok(response) => println!(
            "   ✓ {} values, {} errors",
            response.secret_values.map_or(0, |v| v.len()),
            response.errors.map_or(0, |v| v.len())
        ),
        Err(e) => println!("   ✗ {}", e),
    }

    println!("\n5. Metrics:\n{}", metrics.render());

    client.close()?;
    println!("\n=== Example completed ===");
    Ok(())
}

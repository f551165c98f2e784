//! Secrets Manager request metrics

use std::time::Instant;

use ::metrics::{counter, histogram};

pub const GET_SECRET_VALUE: &str = "get_secret_value";
pub const BATCH_GET_SECRET_VALUE: &str = "batch_get_secret_value";
pub const DESCRIBE_SECRET: &str = "describe_secret";

/// 记录一次 Secrets Manager 调用
pub fn record_request(operation: &'static str, success: bool, started: Instant) {
    let labels = [
        ("operation", operation.to_string()),
        ("success", success.to_string()),
    ];

    counter!("secretsmanager_requests_total", &labels).increment(1);
    histogram!("secretsmanager_request_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}

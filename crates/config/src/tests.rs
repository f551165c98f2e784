use crate::{AppConfig, AuthConfig, AwsConfig};
use figment::Jail;
use secrecy::{ExposeSecret, Secret};

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_secret_password".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_secret_password"));
}

#[test]
fn test_config_struct_redaction() {
    let config = AwsConfig {
        region: "us-east-1".to_string(),
        auth: AuthConfig::session("AKIDEXAMPLE", "wJalrXUtnFEMI", "FwoGZXIvYXdzEJr"),
        endpoint_url: None,
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("wJalrXUtnFEMI"));
    assert!(!debug_output.contains("FwoGZXIvYXdzEJr"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_auth_without_token_is_basic() {
    let auth: AuthConfig = serde_json::from_value(serde_json::json!({
        "access_key_id": "AKIDEXAMPLE",
        "secret_access_key": "secret"
    }))
    .unwrap();
    assert!(matches!(auth, AuthConfig::Basic { .. }));
    assert_eq!(auth.access_key_id(), "AKIDEXAMPLE");
    assert!(auth.session_token().is_none());
}

#[test]
fn test_auth_with_token_is_session() {
    let auth: AuthConfig = serde_json::from_value(serde_json::json!({
        "access_key_id": "AKIDEXAMPLE",
        "secret_access_key": "secret",
        "session_token": "token"
    }))
    .unwrap();
    assert!(matches!(auth, AuthConfig::Session { .. }));
    assert_eq!(auth.secret_access_key().expose_secret(), "secret");
    assert_eq!(
        auth.session_token().map(|t| t.expose_secret().as_str()),
        Some("token")
    );
}

#[test]
fn test_empty_session_token_is_basic() {
    let auth: AuthConfig = serde_json::from_value(serde_json::json!({
        "access_key_id": "AKIDEXAMPLE",
        "secret_access_key": "secret",
        "session_token": ""
    }))
    .unwrap();
    assert!(matches!(auth, AuthConfig::Basic { .. }));
}

#[test]
fn test_load_layers_files_and_env() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
                app_name = "secrets-demo"

                [aws]
                region = "us-east-1"

                [aws.auth]
                access_key_id = "AKIDEXAMPLE"
                secret_access_key = "from-file"
            "#,
        )?;
        jail.create_file(
            "production.toml",
            r#"
                app_env = "production"

                [telemetry]
                json = true
            "#,
        )?;
        jail.set_env("APP_ENV", "production");
        jail.set_env("APP_AWS__REGION", "eu-west-1");
        jail.set_env("APP_AWS__AUTH__SESSION_TOKEN", "from-env");

        let config = AppConfig::load(".").expect("config should load");
        assert_eq!(config.app_name, "secrets-demo");
        assert!(config.is_production());
        assert_eq!(config.aws.region, "eu-west-1");
        assert!(config.aws.endpoint_url.is_none());
        assert!(matches!(config.aws.auth, AuthConfig::Session { .. }));
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.telemetry.json);
        Ok(())
    });
}

#[test]
fn test_missing_region_fails() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
                app_name = "secrets-demo"

                [aws.auth]
                access_key_id = "AKIDEXAMPLE"
                secret_access_key = "from-file"
            "#,
        )?;
        assert!(AppConfig::load(".").is_err());
        Ok(())
    });
}

#[test]
fn test_app_env_defaults_to_development() {
    Jail::expect_with(|jail| {
        jail.clear_env();
        jail.create_file(
            "default.toml",
            r#"
                app_name = "secrets-demo"

                [aws]
                region = "us-east-1"

                [aws.auth]
                access_key_id = "AKIDEXAMPLE"
                secret_access_key = "from-file"
            "#,
        )?;

        let config = AppConfig::load(".").expect("config should load");
        assert_eq!(config.app_env, "development");
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(matches!(config.aws.auth, AuthConfig::Basic { .. }));
        Ok(())
    });
}

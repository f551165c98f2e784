//! config - 配置加载库
//!
//! Layered configuration for applications embedding the Secrets Manager
//! connector: `<dir>/default.toml`, then `<dir>/<APP_ENV>.toml`, then
//! `APP_`-prefixed environment variables (`__` separates nesting levels, e.g.
//! `APP_AWS__REGION`).

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use thiserror::Error;

use secrecy::{ExposeSecret, Secret};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// Static AWS credentials.
///
/// Deserialized from a flat `{ access_key_id, secret_access_key, session_token? }`
/// record. The variant is picked once, when the value is built: a session
/// token selects [`AuthConfig::Session`], otherwise [`AuthConfig::Basic`].
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "StaticAuthConfig")]
pub enum AuthConfig {
    Basic {
        access_key_id: String,
        secret_access_key: Secret<String>,
    },
    Session {
        access_key_id: String,
        secret_access_key: Secret<String>,
        session_token: Secret<String>,
    },
}

impl AuthConfig {
    pub fn basic(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self::Basic {
            access_key_id: access_key_id.into(),
            secret_access_key: Secret::new(secret_access_key.into()),
        }
    }

    pub fn session(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self::Session {
            access_key_id: access_key_id.into(),
            secret_access_key: Secret::new(secret_access_key.into()),
            session_token: Secret::new(session_token.into()),
        }
    }

    pub fn access_key_id(&self) -> &str {
        match self {
            Self::Basic { access_key_id, .. } | Self::Session { access_key_id, .. } => {
                access_key_id
            }
        }
    }

    pub fn secret_access_key(&self) -> &Secret<String> {
        match self {
            Self::Basic {
                secret_access_key, ..
            }
            | Self::Session {
                secret_access_key, ..
            } => secret_access_key,
        }
    }

    pub fn session_token(&self) -> Option<&Secret<String>> {
        match self {
            Self::Basic { .. } => None,
            Self::Session { session_token, .. } => Some(session_token),
        }
    }
}

/// Wire shape of [`AuthConfig`].
#[derive(Deserialize)]
struct StaticAuthConfig {
    access_key_id: String,
    secret_access_key: Secret<String>,
    #[serde(default)]
    session_token: Option<Secret<String>>,
}

impl From<StaticAuthConfig> for AuthConfig {
    fn from(raw: StaticAuthConfig) -> Self {
        // An empty token in a TOML file or env var means "not set".
        let session_token = raw
            .session_token
            .filter(|token| !token.expose_secret().is_empty());
        match session_token {
            Some(session_token) => Self::Session {
                access_key_id: raw.access_key_id,
                secret_access_key: raw.secret_access_key,
                session_token,
            },
            None => Self::Basic {
                access_key_id: raw.access_key_id,
                secret_access_key: raw.secret_access_key,
            },
        }
    }
}

/// AWS 连接配置
#[derive(Debug, Clone, Deserialize)]
pub struct AwsConfig {
    pub region: String,
    pub auth: AuthConfig,
    /// Overrides the Secrets Manager endpoint, e.g. for LocalStack.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app_name: String,
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub aws: AwsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_app_env() -> String {
    "development".to_string()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| default_app_env());
        Self::from_figment(
            Figment::new()
                .merge(Toml::file(format!("{}/default.toml", config_dir)))
                .merge(Toml::file(format!("{}/{}.toml", config_dir, env))),
        )
    }

    /// Extracts the configuration from `base` with the environment layered on top.
    pub fn from_figment(base: Figment) -> Result<Self, ConfigError> {
        let config: Self = base.merge(Env::prefixed("APP_").split("__")).extract()?;
        Ok(config)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// 是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

#[cfg(test)]
mod tests;

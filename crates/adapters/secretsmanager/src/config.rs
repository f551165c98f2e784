//! Secrets Manager client configuration

pub use ::config::AuthConfig;
use ::config::AwsConfig;

/// Secrets Manager client configuration
#[derive(Debug, Clone)]
pub struct SecretsManagerConfig {
    /// AWS region the client is bound to, e.g. `us-east-1`
    pub region: String,

    /// Static credentials
    pub auth: AuthConfig,

    /// Endpoint override (LocalStack, VPC endpoints)
    pub endpoint_url: Option<String>,
}

impl SecretsManagerConfig {
    pub fn new(region: impl Into<String>, auth: AuthConfig) -> Self {
        Self {
            region: region.into(),
            auth,
            endpoint_url: None,
        }
    }
}

impl From<AwsConfig> for SecretsManagerConfig {
    fn from(config: AwsConfig) -> Self {
        Self {
            region: config.region,
            auth: config.auth,
            endpoint_url: config.endpoint_url,
        }
    }
}

/// Builder for SecretsManagerConfig
pub struct SecretsManagerConfigBuilder {
    region: String,
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
    endpoint_url: Option<String>,
}

impl SecretsManagerConfigBuilder {
    /// Create a new builder with region
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: None,
            endpoint_url: None,
        }
    }

    /// Set the access key pair
    pub fn with_static_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = access_key_id.into();
        self.secret_access_key = secret_access_key.into();
        self
    }

    /// Set a temporary session token
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    /// Set endpoint override
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> SecretsManagerConfig {
        let auth = match self.session_token {
            Some(token) => AuthConfig::session(self.access_key_id, self.secret_access_key, token),
            None => AuthConfig::basic(self.access_key_id, self.secret_access_key),
        };
        SecretsManagerConfig {
            region: self.region,
            auth,
            endpoint_url: self.endpoint_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_without_token_is_basic() {
        let config = SecretsManagerConfigBuilder::new("us-east-1")
            .with_static_credentials("AKIDEXAMPLE", "secret")
            .build();

        assert_eq!(config.region, "us-east-1");
        assert!(matches!(config.auth, AuthConfig::Basic { .. }));
        assert_eq!(config.auth.access_key_id(), "AKIDEXAMPLE");
        assert!(config.endpoint_url.is_none());
    }

    #[test]
    fn test_builder_with_token_is_session() {
        let config = SecretsManagerConfigBuilder::new("eu-west-1")
            .with_static_credentials("AKIDEXAMPLE", "secret")
            .with_session_token("token")
            .with_endpoint_url("http://localhost:4566")
            .build();

        assert!(matches!(config.auth, AuthConfig::Session { .. }));
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_from_aws_config() {
        let config = SecretsManagerConfig::from(AwsConfig {
            region: "ap-south-1".to_string(),
            auth: AuthConfig::basic("AKIDEXAMPLE", "secret"),
            endpoint_url: None,
        });
        assert_eq!(config.region, "ap-south-1");
        assert!(config.auth.session_token().is_none());
    }
}

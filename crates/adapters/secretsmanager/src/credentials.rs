//! Static credential resolution

use aws_credential_types::Credentials;
use secrecy::ExposeSecret;

use crate::config::AuthConfig;

/// Provider name reported by the SDK for credentials built here.
pub const PROVIDER_NAME: &str = "StaticAuthConfig";

/// Build SDK credentials from the configured auth.
///
/// No format checks happen here; bad keys surface as service errors on the
/// first request.
pub fn resolve(auth: &AuthConfig) -> Credentials {
    match auth {
        AuthConfig::Session {
            access_key_id,
            secret_access_key,
            session_token,
        } => Credentials::new(
            access_key_id.as_str(),
            secret_access_key.expose_secret().as_str(),
            Some(session_token.expose_secret().clone()),
            None,
            PROVIDER_NAME,
        ),
        AuthConfig::Basic {
            access_key_id,
            secret_access_key,
        } => Credentials::new(
            access_key_id.as_str(),
            secret_access_key.expose_secret().as_str(),
            None,
            None,
            PROVIDER_NAME,
        ),
    }
}

//! Environment-based defaults applied to new client registrations.

use anyhow::Result;

use crate::errors::ConfigError;
use crate::oauth::settings::{ClientSettings, TokenSettings};

/// Default PKCE requirement for new clients
#[derive(Clone, Debug)]
pub struct ClientDefaultRequireProofKey(bool);

/// Default user consent requirement for new clients
#[derive(Clone, Debug)]
pub struct ClientDefaultRequireUserConsent(bool);

/// Default access token time-to-live
#[derive(Clone, Debug)]
pub struct ClientDefaultAccessTokenTtl(chrono::Duration);

/// Default refresh token time-to-live
#[derive(Clone, Debug)]
pub struct ClientDefaultRefreshTokenTtl(chrono::Duration);

/// Default refresh token reuse policy
#[derive(Clone, Debug)]
pub struct ClientDefaultReuseRefreshTokens(bool);

/// Main application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub version: String,
    pub client_default_require_proof_key: ClientDefaultRequireProofKey,
    pub client_default_require_user_consent: ClientDefaultRequireUserConsent,
    pub client_default_access_token_ttl: ClientDefaultAccessTokenTtl,
    pub client_default_refresh_token_ttl: ClientDefaultRefreshTokenTtl,
    pub client_default_reuse_refresh_tokens: ClientDefaultReuseRefreshTokens,
}

impl Config {
    /// Create a new configuration from environment variables
    pub fn new() -> Result<Self> {
        let client_default_require_proof_key: ClientDefaultRequireProofKey =
            default_env("CLIENT_DEFAULT_REQUIRE_PROOF_KEY", "false").try_into()?;
        let client_default_require_user_consent: ClientDefaultRequireUserConsent =
            default_env("CLIENT_DEFAULT_REQUIRE_USER_CONSENT", "false").try_into()?;
        let client_default_access_token_ttl: ClientDefaultAccessTokenTtl =
            default_env("CLIENT_DEFAULT_ACCESS_TOKEN_TTL", "5m").try_into()?;
        let client_default_refresh_token_ttl: ClientDefaultRefreshTokenTtl =
            default_env("CLIENT_DEFAULT_REFRESH_TOKEN_TTL", "60m").try_into()?;
        let client_default_reuse_refresh_tokens: ClientDefaultReuseRefreshTokens =
            default_env("CLIENT_DEFAULT_REUSE_REFRESH_TOKENS", "true").try_into()?;

        Ok(Self {
            version: version()?,
            client_default_require_proof_key,
            client_default_require_user_consent,
            client_default_access_token_ttl,
            client_default_refresh_token_ttl,
            client_default_reuse_refresh_tokens,
        })
    }

    /// Client settings carrying the configured defaults
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings::new()
            .with_require_proof_key(*self.client_default_require_proof_key.as_ref())
            .with_require_user_consent(*self.client_default_require_user_consent.as_ref())
    }

    /// Token settings carrying the configured defaults
    pub fn token_settings(&self) -> Result<TokenSettings> {
        Ok(TokenSettings::new()
            .with_access_token_time_to_live(*self.client_default_access_token_ttl.as_ref())?
            .with_refresh_token_time_to_live(*self.client_default_refresh_token_ttl.as_ref())?
            .with_reuse_refresh_tokens(*self.client_default_reuse_refresh_tokens.as_ref()))
    }
}

/// Get application version from build environment
pub fn version() -> Result<String> {
    option_env!("GIT_HASH")
        .or(option_env!("CARGO_PKG_VERSION"))
        .map(|val| val.to_string())
        .ok_or(ConfigError::VersionNotSet.into())
}

fn default_env(name: &str, default_value: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default_value.to_string())
}

fn parse_bool(value: String) -> std::result::Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::BoolParsingFailed(value)),
    }
}

fn parse_ttl(name: &str, value: String) -> std::result::Result<chrono::Duration, ConfigError> {
    let duration = duration_str::parse(&value)
        .map_err(|e| ConfigError::DurationParsingFailed(value.clone(), e.to_string()))?;
    let duration = chrono::Duration::from_std(duration)
        .map_err(|e| ConfigError::DurationParsingFailed(value, e.to_string()))?;
    if duration.num_seconds() <= 0 {
        return Err(ConfigError::NonPositiveDuration(name.to_string()));
    }
    Ok(duration)
}

impl TryFrom<String> for ClientDefaultRequireProofKey {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(parse_bool(value)?))
    }
}

impl AsRef<bool> for ClientDefaultRequireProofKey {
    fn as_ref(&self) -> &bool {
        &self.0
    }
}

impl TryFrom<String> for ClientDefaultRequireUserConsent {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(parse_bool(value)?))
    }
}

impl AsRef<bool> for ClientDefaultRequireUserConsent {
    fn as_ref(&self) -> &bool {
        &self.0
    }
}

impl TryFrom<String> for ClientDefaultAccessTokenTtl {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(parse_ttl("CLIENT_DEFAULT_ACCESS_TOKEN_TTL", value)?))
    }
}

impl AsRef<chrono::Duration> for ClientDefaultAccessTokenTtl {
    fn as_ref(&self) -> &chrono::Duration {
        &self.0
    }
}

impl TryFrom<String> for ClientDefaultRefreshTokenTtl {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(parse_ttl("CLIENT_DEFAULT_REFRESH_TOKEN_TTL", value)?))
    }
}

impl AsRef<chrono::Duration> for ClientDefaultRefreshTokenTtl {
    fn as_ref(&self) -> &chrono::Duration {
        &self.0
    }
}

impl TryFrom<String> for ClientDefaultReuseRefreshTokens {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(parse_bool(value)?))
    }
}

impl AsRef<bool> for ClientDefaultReuseRefreshTokens {
    fn as_ref(&self) -> &bool {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_parsing() {
        for value in ["true", "1", "yes", "ON"] {
            let parsed: ClientDefaultRequireProofKey = value.to_string().try_into().unwrap();
            assert!(*parsed.as_ref(), "{} should parse as true", value);
        }
        for value in ["false", "0", "no", "Off"] {
            let parsed: ClientDefaultReuseRefreshTokens = value.to_string().try_into().unwrap();
            assert!(!*parsed.as_ref(), "{} should parse as false", value);
        }

        let invalid = ClientDefaultRequireUserConsent::try_from("maybe".to_string());
        assert!(invalid.is_err());
        if let Err(e) = invalid {
            assert!(e.to_string().contains("error-rc-config-3"));
        }
    }

    #[test]
    fn test_ttl_parsing() {
        let access: ClientDefaultAccessTokenTtl = "15m".to_string().try_into().unwrap();
        assert_eq!(access.as_ref(), &chrono::Duration::minutes(15));

        let refresh: ClientDefaultRefreshTokenTtl = "14d".to_string().try_into().unwrap();
        assert_eq!(refresh.as_ref(), &chrono::Duration::days(14));

        let invalid = ClientDefaultAccessTokenTtl::try_from("soon".to_string());
        assert!(invalid.is_err());
        if let Err(e) = invalid {
            assert!(e.to_string().contains("error-rc-config-2"));
        }

        let zero = ClientDefaultRefreshTokenTtl::try_from("0s".to_string());
        assert!(zero.is_err());
        if let Err(e) = zero {
            assert!(e.to_string().contains("CLIENT_DEFAULT_REFRESH_TOKEN_TTL"));
        }
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            version: "test".to_string(),
            client_default_require_proof_key: ClientDefaultRequireProofKey(true),
            client_default_require_user_consent: ClientDefaultRequireUserConsent(false),
            client_default_access_token_ttl: ClientDefaultAccessTokenTtl(
                chrono::Duration::minutes(10),
            ),
            client_default_refresh_token_ttl: ClientDefaultRefreshTokenTtl(
                chrono::Duration::days(1),
            ),
            client_default_reuse_refresh_tokens: ClientDefaultReuseRefreshTokens(false),
        };

        let client_settings = config.client_settings();
        assert!(client_settings.require_proof_key());
        assert!(!client_settings.require_user_consent());

        let token_settings = config.token_settings().unwrap();
        assert_eq!(
            token_settings.access_token_time_to_live(),
            chrono::Duration::minutes(10)
        );
        assert_eq!(
            token_settings.refresh_token_time_to_live(),
            chrono::Duration::days(1)
        );
        assert!(!token_settings.reuse_refresh_tokens());
    }
}

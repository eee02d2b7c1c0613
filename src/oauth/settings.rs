//! Client and token configuration settings attached to a registered client.
//!
//! Both containers are a bag of named values. The registration record never
//! inspects the keys, it only needs a default instance and a copy constructor.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ClientRegistrationError;

/// Raw settings storage shared by both containers
pub type Settings = Map<String, Value>;

/// Require PKCE for the authorization code flow
pub const REQUIRE_PROOF_KEY: &str = "setting.client.require-proof-key";

/// Require resource owner consent when the client requests access
pub const REQUIRE_USER_CONSENT: &str = "setting.client.require-user-consent";

/// Access token time-to-live, in seconds
pub const ACCESS_TOKEN_TIME_TO_LIVE: &str = "setting.token.access-token-time-to-live";

/// Whether refresh tokens are reused when returning access token responses
pub const REUSE_REFRESH_TOKENS: &str = "setting.token.reuse-refresh-tokens";

/// Refresh token time-to-live, in seconds
pub const REFRESH_TOKEN_TIME_TO_LIVE: &str = "setting.token.refresh-token-time-to-live";

const DEFAULT_ACCESS_TOKEN_TIME_TO_LIVE_SECS: i64 = 5 * 60;
const DEFAULT_REFRESH_TOKEN_TIME_TO_LIVE_SECS: i64 = 60 * 60;

/// Client configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSettings {
    settings: Settings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        let mut settings = Settings::new();
        settings.insert(REQUIRE_PROOF_KEY.to_string(), Value::Bool(false));
        settings.insert(REQUIRE_USER_CONSENT.to_string(), Value::Bool(false));
        Self { settings }
    }
}

impl ClientSettings {
    /// Create client settings populated with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create client settings holding an independent copy of `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn setting(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }

    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }

    /// Whether the client must use PKCE with the authorization code grant
    pub fn require_proof_key(&self) -> bool {
        self.bool_setting(REQUIRE_PROOF_KEY)
    }

    pub fn with_require_proof_key(self, require_proof_key: bool) -> Self {
        self.with_setting(REQUIRE_PROOF_KEY, require_proof_key)
    }

    /// Whether authorization requests from the client need user consent
    pub fn require_user_consent(&self) -> bool {
        self.bool_setting(REQUIRE_USER_CONSENT)
    }

    pub fn with_require_user_consent(self, require_user_consent: bool) -> Self {
        self.with_setting(REQUIRE_USER_CONSENT, require_user_consent)
    }

    fn bool_setting(&self, name: &str) -> bool {
        self.setting(name).and_then(Value::as_bool).unwrap_or(false)
    }
}

/// Token configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSettings {
    settings: Settings,
}

impl Default for TokenSettings {
    fn default() -> Self {
        let mut settings = Settings::new();
        settings.insert(
            ACCESS_TOKEN_TIME_TO_LIVE.to_string(),
            Value::from(DEFAULT_ACCESS_TOKEN_TIME_TO_LIVE_SECS),
        );
        settings.insert(REUSE_REFRESH_TOKENS.to_string(), Value::Bool(true));
        settings.insert(
            REFRESH_TOKEN_TIME_TO_LIVE.to_string(),
            Value::from(DEFAULT_REFRESH_TOKEN_TIME_TO_LIVE_SECS),
        );
        Self { settings }
    }
}

impl TokenSettings {
    /// Create token settings populated with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create token settings holding an independent copy of `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn setting(&self, name: &str) -> Option<&Value> {
        self.settings.get(name)
    }

    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }

    /// Time-to-live of issued access tokens
    pub fn access_token_time_to_live(&self) -> Duration {
        self.duration_setting(
            ACCESS_TOKEN_TIME_TO_LIVE,
            DEFAULT_ACCESS_TOKEN_TIME_TO_LIVE_SECS,
        )
    }

    pub fn with_access_token_time_to_live(
        self,
        time_to_live: Duration,
    ) -> Result<Self, ClientRegistrationError> {
        self.with_duration_setting(
            ACCESS_TOKEN_TIME_TO_LIVE,
            "accessTokenTimeToLive",
            time_to_live,
        )
    }

    /// Whether refresh tokens are reused or rotated on refresh
    pub fn reuse_refresh_tokens(&self) -> bool {
        self.setting(REUSE_REFRESH_TOKENS)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn with_reuse_refresh_tokens(self, reuse_refresh_tokens: bool) -> Self {
        self.with_setting(REUSE_REFRESH_TOKENS, reuse_refresh_tokens)
    }

    /// Time-to-live of issued refresh tokens
    pub fn refresh_token_time_to_live(&self) -> Duration {
        self.duration_setting(
            REFRESH_TOKEN_TIME_TO_LIVE,
            DEFAULT_REFRESH_TOKEN_TIME_TO_LIVE_SECS,
        )
    }

    pub fn with_refresh_token_time_to_live(
        self,
        time_to_live: Duration,
    ) -> Result<Self, ClientRegistrationError> {
        self.with_duration_setting(
            REFRESH_TOKEN_TIME_TO_LIVE,
            "refreshTokenTimeToLive",
            time_to_live,
        )
    }

    fn duration_setting(&self, name: &str, default_secs: i64) -> Duration {
        self.setting(name)
            .and_then(Value::as_i64)
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::seconds(default_secs))
    }

    fn with_duration_setting(
        self,
        name: &str,
        argument: &'static str,
        time_to_live: Duration,
    ) -> Result<Self, ClientRegistrationError> {
        if time_to_live.num_seconds() <= 0 {
            return Err(ClientRegistrationError::invalid_argument(
                argument,
                format!("{} must be greater than 0", argument),
            ));
        }
        Ok(self.with_setting(name, time_to_live.num_seconds()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_settings_defaults() {
        let settings = ClientSettings::new();
        assert!(!settings.require_proof_key());
        assert!(!settings.require_user_consent());
        assert_eq!(settings.settings().len(), 2);
    }

    #[test]
    fn test_client_settings_copy_is_independent() {
        let original = ClientSettings::new().with_require_proof_key(true);
        let copy =
            ClientSettings::from_settings(original.settings()).with_require_user_consent(true);

        assert!(copy.require_proof_key());
        assert!(copy.require_user_consent());
        assert!(!original.require_user_consent());
    }

    #[test]
    fn test_custom_setting() {
        let settings =
            ClientSettings::new().with_setting("custom.logo", "https://example.com/logo.png");
        assert_eq!(
            settings.setting("custom.logo").and_then(Value::as_str),
            Some("https://example.com/logo.png")
        );
    }

    #[test]
    fn test_token_settings_defaults() {
        let settings = TokenSettings::new();
        assert_eq!(settings.access_token_time_to_live(), Duration::minutes(5));
        assert_eq!(settings.refresh_token_time_to_live(), Duration::minutes(60));
        assert!(settings.reuse_refresh_tokens());
    }

    #[test]
    fn test_token_settings_time_to_live() {
        let settings = TokenSettings::new()
            .with_access_token_time_to_live(Duration::minutes(30))
            .unwrap()
            .with_refresh_token_time_to_live(Duration::days(14))
            .unwrap()
            .with_reuse_refresh_tokens(false);

        assert_eq!(settings.access_token_time_to_live(), Duration::minutes(30));
        assert_eq!(settings.refresh_token_time_to_live(), Duration::days(14));
        assert!(!settings.reuse_refresh_tokens());
    }

    #[test]
    fn test_token_settings_rejects_non_positive_time_to_live() {
        let result = TokenSettings::new().with_access_token_time_to_live(Duration::zero());
        assert!(matches!(
            result,
            Err(ClientRegistrationError::InvalidArgument {
                argument: "accessTokenTimeToLive",
                ..
            })
        ));

        let result = TokenSettings::new().with_refresh_token_time_to_live(Duration::seconds(-1));
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_serialize_as_plain_map() {
        let json = serde_json::to_value(TokenSettings::new()).unwrap();
        assert_eq!(json[ACCESS_TOKEN_TIME_TO_LIVE], 300);
        assert_eq!(json[REUSE_REFRESH_TOKENS], true);

        let settings: ClientSettings =
            serde_json::from_value(serde_json::json!({ REQUIRE_PROOF_KEY: true })).unwrap();
        assert!(settings.require_proof_key());
        assert!(!settings.require_user_consent());
    }
}

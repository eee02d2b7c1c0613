//! OAuth 2.0 token types referenced by client registrations.
//!
//! Defines the grant type and client authentication method enums along with
//! identifier and secret generators.

use base64::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::ClientRegistrationError;

/// OAuth 2.0 Authorization Grant Types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationGrantType {
    AuthorizationCode,
    Implicit,
    RefreshToken,
    ClientCredentials,
    Password,
}

impl AuthorizationGrantType {
    /// The OAuth wire name of the grant type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::Implicit => "implicit",
            Self::RefreshToken => "refresh_token",
            Self::ClientCredentials => "client_credentials",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for AuthorizationGrantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorizationGrantType {
    type Err = ClientRegistrationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "authorization_code" => Ok(Self::AuthorizationCode),
            "implicit" => Ok(Self::Implicit),
            "refresh_token" => Ok(Self::RefreshToken),
            "client_credentials" => Ok(Self::ClientCredentials),
            "password" => Ok(Self::Password),
            other => Err(ClientRegistrationError::invalid_argument(
                "authorizationGrantType",
                format!("unknown grant type \"{}\"", other),
            )),
        }
    }
}

/// OAuth 2.0 Client Authentication Methods
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthenticationMethod {
    /// HTTP Basic authentication with the client credentials
    #[default]
    Basic,
    /// Client credentials in the request body
    Post,
    /// Public client, no authentication
    None,
}

impl ClientAuthenticationMethod {
    /// The OAuth wire name of the authentication method
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Post => "post",
            Self::None => "none",
        }
    }
}

impl fmt::Display for ClientAuthenticationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientAuthenticationMethod {
    type Err = ClientRegistrationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "basic" => Ok(Self::Basic),
            "post" => Ok(Self::Post),
            "none" => Ok(Self::None),
            other => Err(ClientRegistrationError::invalid_argument(
                "clientAuthenticationMethod",
                format!("unknown client authentication method \"{}\"", other),
            )),
        }
    }
}

/// Generate a secure random token suitable for a client secret
pub fn generate_token() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.r#gen();
    BASE64_URL_SAFE_NO_PAD.encode(bytes)
}

/// Generate a registration identifier
pub fn generate_registration_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_type_wire_names() {
        for grant_type in [
            AuthorizationGrantType::AuthorizationCode,
            AuthorizationGrantType::Implicit,
            AuthorizationGrantType::RefreshToken,
            AuthorizationGrantType::ClientCredentials,
            AuthorizationGrantType::Password,
        ] {
            let json = serde_json::to_string(&grant_type).unwrap();
            assert_eq!(json, format!("\"{}\"", grant_type));
            assert_eq!(grant_type.as_str().parse::<AuthorizationGrantType>(), Ok(grant_type));
        }
    }

    #[test]
    fn test_unknown_grant_type() {
        let error = "urn:ietf:params:oauth:grant-type:device_code"
            .parse::<AuthorizationGrantType>()
            .unwrap_err();
        assert_eq!(error.argument(), "authorizationGrantType");
        assert!(error.reason().contains("device_code"));
    }

    #[test]
    fn test_authentication_method_parsing() {
        assert_eq!(
            "post".parse::<ClientAuthenticationMethod>(),
            Ok(ClientAuthenticationMethod::Post)
        );
        assert_eq!(
            serde_json::from_str::<ClientAuthenticationMethod>("\"none\"").unwrap(),
            ClientAuthenticationMethod::None
        );
        assert!("client_secret_jwt".parse::<ClientAuthenticationMethod>().is_err());
        assert_eq!(ClientAuthenticationMethod::default(), ClientAuthenticationMethod::Basic);
    }

    #[test]
    fn test_generate_token() {
        let first = generate_token();
        let second = generate_token();
        assert_eq!(first.len(), 43);
        assert_ne!(first, second);
        assert!(
            first
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_generate_registration_id() {
        let id = generate_registration_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}

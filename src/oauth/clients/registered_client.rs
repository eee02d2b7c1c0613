//! A client registration with an OAuth 2.0 authorization server (RFC 6749 section 2).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::builder::RegisteredClientBuilder;
use crate::errors::{ClientRegistrationError, Result};
use crate::oauth::settings::{ClientSettings, TokenSettings};
use crate::oauth::types::{AuthorizationGrantType, ClientAuthenticationMethod};

/// An immutable, validated client registration.
///
/// Instances only come out of [`RegisteredClientBuilder::build`]. Deserializing a
/// stored registration runs the same builder, so a record loaded from storage
/// holds the same invariants as a freshly built one.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredRegisteredClient")]
pub struct RegisteredClient {
    pub(super) id: String,
    pub(super) client_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) client_secret: Option<String>,
    pub(super) client_authentication_methods: IndexSet<ClientAuthenticationMethod>,
    pub(super) authorization_grant_types: IndexSet<AuthorizationGrantType>,
    pub(super) redirect_uris: IndexSet<String>,
    pub(super) scopes: IndexSet<String>,
    pub(super) client_settings: ClientSettings,
    pub(super) token_settings: TokenSettings,
}

impl RegisteredClient {
    /// Start a new builder for the registration identified by `id`.
    pub fn with_id(id: impl Into<String>) -> Result<RegisteredClientBuilder> {
        RegisteredClientBuilder::new(id)
    }

    /// Start a new builder seeded from an existing registration.
    ///
    /// Takes an `Option` so the result of a registration lookup can be passed
    /// straight through; a missing registration is an invalid argument.
    pub fn with_registered_client(
        registered_client: Option<&RegisteredClient>,
    ) -> Result<RegisteredClientBuilder> {
        registered_client
            .map(RegisteredClientBuilder::from)
            .ok_or_else(|| {
                ClientRegistrationError::invalid_argument(
                    "registeredClient",
                    "registeredClient cannot be null",
                )
            })
    }

    /// A builder seeded from this registration.
    pub fn to_builder(&self) -> RegisteredClientBuilder {
        RegisteredClientBuilder::from(self)
    }

    /// The identifier for the registration
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The client identifier
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The client secret, absent for public clients
    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// Authentication methods the client may use with the authorization server
    pub fn client_authentication_methods(&self) -> &IndexSet<ClientAuthenticationMethod> {
        &self.client_authentication_methods
    }

    /// Authorization grant types the client may use
    pub fn authorization_grant_types(&self) -> &IndexSet<AuthorizationGrantType> {
        &self.authorization_grant_types
    }

    /// Redirect URIs the client may use in redirect-based flows
    pub fn redirect_uris(&self) -> &IndexSet<String> {
        &self.redirect_uris
    }

    /// Scopes the client may request
    pub fn scopes(&self) -> &IndexSet<String> {
        &self.scopes
    }

    pub fn client_settings(&self) -> &ClientSettings {
        &self.client_settings
    }

    pub fn token_settings(&self) -> &TokenSettings {
        &self.token_settings
    }

    pub fn supports_grant_type(&self, grant_type: AuthorizationGrantType) -> bool {
        self.authorization_grant_types.contains(&grant_type)
    }

    pub fn has_redirect_uri(&self, redirect_uri: &str) -> bool {
        self.redirect_uris.contains(redirect_uri)
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }
}

fn join<T: fmt::Display>(items: &IndexSet<T>) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// The secret never appears in diagnostic output.
impl fmt::Display for RegisteredClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RegisteredClient {{ id: {:?}, client_id: {:?}, client_authentication_methods: {{{}}}, \
             authorization_grant_types: {{{}}}, redirect_uris: {:?}, scopes: {:?} }}",
            self.id,
            self.client_id,
            join(&self.client_authentication_methods),
            join(&self.authorization_grant_types),
            self.redirect_uris,
            self.scopes,
        )
    }
}

impl fmt::Debug for RegisteredClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredClient")
            .field("id", &self.id)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "client_authentication_methods",
                &self.client_authentication_methods,
            )
            .field("authorization_grant_types", &self.authorization_grant_types)
            .field("redirect_uris", &self.redirect_uris)
            .field("scopes", &self.scopes)
            .field("client_settings", &self.client_settings)
            .field("token_settings", &self.token_settings)
            .finish()
    }
}

/// Wire form of a registration as handed back by a persistence layer.
#[derive(Deserialize)]
struct StoredRegisteredClient {
    id: String,
    client_id: String,
    #[serde(default)]
    client_secret: Option<String>,
    #[serde(default)]
    client_authentication_methods: Vec<ClientAuthenticationMethod>,
    #[serde(default)]
    authorization_grant_types: Vec<AuthorizationGrantType>,
    #[serde(default)]
    redirect_uris: Vec<String>,
    #[serde(default)]
    scopes: Vec<String>,
    #[serde(default)]
    client_settings: Option<ClientSettings>,
    #[serde(default)]
    token_settings: Option<TokenSettings>,
}

impl TryFrom<StoredRegisteredClient> for RegisteredClient {
    type Error = ClientRegistrationError;

    fn try_from(stored: StoredRegisteredClient) -> Result<Self> {
        let mut builder = RegisteredClient::with_id(stored.id)?
            .client_id(stored.client_id)
            .client_authentication_methods(|methods| {
                methods.extend(stored.client_authentication_methods)
            })
            .authorization_grant_types(|grant_types| {
                grant_types.extend(stored.authorization_grant_types)
            })
            .redirect_uris(|redirect_uris| redirect_uris.extend(stored.redirect_uris))
            .scopes(|scopes| scopes.extend(stored.scopes));

        if let Some(client_secret) = stored.client_secret {
            builder = builder.client_secret(client_secret);
        }
        if let Some(client_settings) = stored.client_settings {
            builder = builder.client_settings(client_settings);
        }
        if let Some(token_settings) = stored.token_settings {
            builder = builder.token_settings(token_settings);
        }

        builder.build()
    }
}

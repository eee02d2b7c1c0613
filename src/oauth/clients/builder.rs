//! Builder and validation for [`RegisteredClient`].

use indexmap::IndexSet;
use std::fmt;

use super::registered_client::RegisteredClient;
use crate::errors::{ClientRegistrationError, Result};
use crate::oauth::redirect_uri_validation::validate_redirect_uris;
use crate::oauth::scope_validation::validate_scopes;
use crate::oauth::settings::{ClientSettings, TokenSettings};
use crate::oauth::types::{AuthorizationGrantType, ClientAuthenticationMethod};

/// Accumulates the attributes of a client registration and validates them
/// into a [`RegisteredClient`].
///
/// Every mutator takes the builder by value and hands it back, so calls chain.
/// [`build`](Self::build) borrows the builder: it can be called again, and later
/// mutations never reach an already built registration.
#[derive(Clone)]
pub struct RegisteredClientBuilder {
    id: String,
    client_id: String,
    client_secret: Option<String>,
    client_authentication_methods: IndexSet<ClientAuthenticationMethod>,
    authorization_grant_types: IndexSet<AuthorizationGrantType>,
    redirect_uris: IndexSet<String>,
    scopes: IndexSet<String>,
    client_settings: Option<ClientSettings>,
    token_settings: Option<TokenSettings>,
}

impl RegisteredClientBuilder {
    /// Create an empty builder for the registration identified by `id`
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ClientRegistrationError::invalid_argument(
                "id",
                "id cannot be empty",
            ));
        }

        Ok(Self {
            id,
            client_id: String::new(),
            client_secret: None,
            client_authentication_methods: IndexSet::new(),
            authorization_grant_types: IndexSet::new(),
            redirect_uris: IndexSet::new(),
            scopes: IndexSet::new(),
            client_settings: None,
            token_settings: None,
        })
    }

    /// Sets the identifier for the registration
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the client identifier
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Sets the client secret
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Adds an authentication method the client may use with the authorization server
    pub fn client_authentication_method(mut self, method: ClientAuthenticationMethod) -> Self {
        self.client_authentication_methods.insert(method);
        self
    }

    /// Add, replace, or remove authentication methods
    pub fn client_authentication_methods<F>(mut self, methods_consumer: F) -> Self
    where
        F: FnOnce(&mut IndexSet<ClientAuthenticationMethod>),
    {
        methods_consumer(&mut self.client_authentication_methods);
        self
    }

    /// Adds an authorization grant type the client may use
    pub fn authorization_grant_type(mut self, grant_type: AuthorizationGrantType) -> Self {
        self.authorization_grant_types.insert(grant_type);
        self
    }

    /// Add, replace, or remove authorization grant types
    pub fn authorization_grant_types<F>(mut self, grant_types_consumer: F) -> Self
    where
        F: FnOnce(&mut IndexSet<AuthorizationGrantType>),
    {
        grant_types_consumer(&mut self.authorization_grant_types);
        self
    }

    /// Adds a redirect URI the client may use in a redirect-based flow
    pub fn redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uris.insert(redirect_uri.into());
        self
    }

    /// Add, replace, or remove redirect URIs
    pub fn redirect_uris<F>(mut self, redirect_uris_consumer: F) -> Self
    where
        F: FnOnce(&mut IndexSet<String>),
    {
        redirect_uris_consumer(&mut self.redirect_uris);
        self
    }

    /// Adds a scope the client may use
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.insert(scope.into());
        self
    }

    /// Add, replace, or remove scopes
    pub fn scopes<F>(mut self, scopes_consumer: F) -> Self
    where
        F: FnOnce(&mut IndexSet<String>),
    {
        scopes_consumer(&mut self.scopes);
        self
    }

    pub fn client_settings(mut self, client_settings: ClientSettings) -> Self {
        self.client_settings = Some(client_settings);
        self
    }

    pub fn token_settings(mut self, token_settings: TokenSettings) -> Self {
        self.token_settings = Some(token_settings);
        self
    }

    /// Validate the accumulated attributes and build the registration.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// client id, grant types, redirect URIs required by `authorization_code`,
    /// scope characters, then redirect URI syntax. An empty set of
    /// authentication methods defaults to `basic`.
    pub fn build(&self) -> Result<RegisteredClient> {
        self.build_validated().inspect_err(|error| {
            tracing::debug!(id = %self.id, error = %error, "client registration rejected");
        })
    }

    fn build_validated(&self) -> Result<RegisteredClient> {
        if self.client_id.trim().is_empty() {
            return Err(ClientRegistrationError::invalid_argument(
                "clientId",
                "clientId cannot be empty",
            ));
        }
        if self.authorization_grant_types.is_empty() {
            return Err(ClientRegistrationError::invalid_argument(
                "authorizationGrantTypes",
                "authorizationGrantTypes cannot be empty",
            ));
        }
        if self
            .authorization_grant_types
            .contains(&AuthorizationGrantType::AuthorizationCode)
            && self.redirect_uris.is_empty()
        {
            return Err(ClientRegistrationError::invalid_argument(
                "redirectUris",
                "redirectUris cannot be empty",
            ));
        }

        let mut client_authentication_methods = self.client_authentication_methods.clone();
        if client_authentication_methods.is_empty() {
            tracing::debug!(
                client_id = %self.client_id,
                "no client authentication method set, defaulting to basic"
            );
            client_authentication_methods.insert(ClientAuthenticationMethod::Basic);
        }

        validate_scopes(&self.scopes)?;
        validate_redirect_uris(&self.redirect_uris)?;

        let registered_client = RegisteredClient {
            id: self.id.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            client_authentication_methods,
            authorization_grant_types: self.authorization_grant_types.clone(),
            redirect_uris: self.redirect_uris.clone(),
            scopes: self.scopes.clone(),
            client_settings: self.client_settings.clone().unwrap_or_default(),
            token_settings: self.token_settings.clone().unwrap_or_default(),
        };

        tracing::debug!(
            id = %registered_client.id,
            client_id = %registered_client.client_id,
            "client registration built"
        );

        Ok(registered_client)
    }
}

impl From<&RegisteredClient> for RegisteredClientBuilder {
    fn from(registered_client: &RegisteredClient) -> Self {
        Self {
            id: registered_client.id.clone(),
            client_id: registered_client.client_id.clone(),
            client_secret: registered_client.client_secret.clone(),
            client_authentication_methods: registered_client
                .client_authentication_methods
                .iter()
                .copied()
                .collect(),
            authorization_grant_types: registered_client
                .authorization_grant_types
                .iter()
                .copied()
                .collect(),
            redirect_uris: registered_client.redirect_uris.iter().cloned().collect(),
            scopes: registered_client.scopes.iter().cloned().collect(),
            client_settings: Some(ClientSettings::from_settings(
                registered_client.client_settings.settings(),
            )),
            token_settings: Some(TokenSettings::from_settings(
                registered_client.token_settings.settings(),
            )),
        }
    }
}

impl fmt::Debug for RegisteredClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredClientBuilder")
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

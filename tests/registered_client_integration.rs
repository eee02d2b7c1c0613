//! Client Registration Integration Tests
//!
//! These tests drive the public API the way an authorization server would:
//! build registrations, derive new ones from stored records, and load them back
//! from their JSON form.

use registered_client::errors::ClientRegistrationError;
use registered_client::oauth::{
    AuthorizationGrantType, ClientAuthenticationMethod, ClientSettings, RegisteredClient,
    TokenSettings,
};

fn web_client() -> RegisteredClient {
    RegisteredClient::with_id("8f2c1c9e-registration")
        .unwrap()
        .client_id("web-app")
        .client_secret("s3cr3t")
        .client_authentication_method(ClientAuthenticationMethod::Basic)
        .authorization_grant_type(AuthorizationGrantType::AuthorizationCode)
        .authorization_grant_type(AuthorizationGrantType::RefreshToken)
        .redirect_uri("https://app.example.com/callback")
        .scope("read")
        .scope("write")
        .client_settings(ClientSettings::new().with_require_proof_key(true))
        .build()
        .unwrap()
}

#[test]
fn test_non_code_grants_do_not_need_redirect_uris() {
    for grant_type in [
        AuthorizationGrantType::ClientCredentials,
        AuthorizationGrantType::Password,
        AuthorizationGrantType::RefreshToken,
        AuthorizationGrantType::Implicit,
    ] {
        let result = RegisteredClient::with_id("registration")
            .unwrap()
            .client_id("client")
            .authorization_grant_type(grant_type)
            .build();
        assert!(result.is_ok(), "{} should not require redirect URIs", grant_type);
    }
}

#[test]
fn test_code_grant_fails_iff_redirect_uris_empty() {
    let builder = RegisteredClient::with_id("registration")
        .unwrap()
        .client_id("client")
        .authorization_grant_type(AuthorizationGrantType::ClientCredentials)
        .authorization_grant_type(AuthorizationGrantType::AuthorizationCode);

    let error = builder.build().unwrap_err();
    assert_eq!(
        error,
        ClientRegistrationError::InvalidArgument {
            argument: "redirectUris",
            reason: "redirectUris cannot be empty".to_string(),
        }
    );

    let client = builder.redirect_uri("/authorized").build().unwrap();
    assert!(client.has_redirect_uri("/authorized"));
}

#[test]
fn test_scope_rules() {
    let builder = RegisteredClient::with_id("registration")
        .unwrap()
        .client_id("client")
        .authorization_grant_type(AuthorizationGrantType::ClientCredentials);

    let error = builder.clone().scope("read write").build().unwrap_err();
    assert!(error.to_string().contains("read write"));
    assert!(error.to_string().contains("contains invalid characters"));

    let client = builder.scope("read").scope("write").build().unwrap();
    assert_eq!(
        client.scopes().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["read", "write"]
    );
}

#[test]
fn test_redirect_uri_rules() {
    let builder = RegisteredClient::with_id("registration")
        .unwrap()
        .client_id("client")
        .authorization_grant_type(AuthorizationGrantType::AuthorizationCode);

    let error = builder
        .clone()
        .redirect_uri("https://example.com/cb#frag")
        .build()
        .unwrap_err();
    assert!(error.to_string().contains("contains fragment"));

    let error = builder
        .clone()
        .redirect_uri("not a uri::://??")
        .build()
        .unwrap_err();
    assert!(error.to_string().contains("not a uri::://??"));

    let client = builder
        .redirect_uri("https://example.com/cb")
        .build()
        .unwrap();
    assert_eq!(
        client.redirect_uris().first().map(String::as_str),
        Some("https://example.com/cb")
    );
}

#[test]
fn test_derived_registration_leaves_original_untouched() {
    let original = web_client();

    let derived = RegisteredClient::with_registered_client(Some(&original))
        .unwrap()
        .scopes(|scopes| {
            scopes.shift_remove("write");
            scopes.insert("admin".to_string());
        })
        .redirect_uris(|redirect_uris| {
            redirect_uris.insert("https://app.example.com/other".to_string());
        })
        .client_settings(
            ClientSettings::from_settings(original.client_settings().settings())
                .with_require_user_consent(true),
        )
        .build()
        .unwrap();

    assert_eq!(
        original.scopes().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["read", "write"]
    );
    assert_eq!(original.redirect_uris().len(), 1);
    assert!(!original.client_settings().require_user_consent());

    assert_eq!(
        derived.scopes().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["read", "admin"]
    );
    assert_eq!(derived.redirect_uris().len(), 2);
    assert!(derived.client_settings().require_proof_key());
    assert!(derived.client_settings().require_user_consent());
    assert_eq!(derived.id(), original.id());
    assert_eq!(derived.client_secret(), original.client_secret());
}

#[test]
fn test_default_settings_present() {
    let client = RegisteredClient::with_id("registration")
        .unwrap()
        .client_id("client")
        .authorization_grant_type(AuthorizationGrantType::ClientCredentials)
        .build()
        .unwrap();

    assert_eq!(client.client_settings(), &ClientSettings::default());
    assert_eq!(client.token_settings(), &TokenSettings::default());
    assert_eq!(
        client.token_settings().access_token_time_to_live(),
        chrono::Duration::minutes(5)
    );
}

#[test]
fn test_stored_registration_round_trip() {
    let original = web_client();
    let stored = serde_json::to_string(&original).unwrap();

    assert!(stored.contains("\"client_secret\":\"s3cr3t\""));

    let loaded: RegisteredClient = serde_json::from_str(&stored).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(loaded.to_string(), original.to_string());
    assert!(!loaded.to_string().contains("s3cr3t"));
}

#[test]
fn test_tampered_stored_registration_rejected() {
    let mut stored = serde_json::to_value(web_client()).unwrap();
    stored["scopes"] = serde_json::json!(["read", "say \"hi\""]);

    let result = serde_json::from_value::<RegisteredClient>(stored);
    let error = result.unwrap_err();
    assert!(error.to_string().contains("scope"));
    assert!(error.to_string().contains("contains invalid characters"));
}

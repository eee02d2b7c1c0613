//! OAuth 2.0 client registration records, their settings and validation rules.

pub mod clients;
pub mod redirect_uri_validation;
pub mod scope_validation;
pub mod settings;
pub mod types;

// Re-export frequently used items from each module
pub use clients::{RegisteredClient, RegisteredClientBuilder};
pub use redirect_uri_validation::is_valid_redirect_uri;
pub use scope_validation::is_valid_scope;
pub use settings::{ClientSettings, TokenSettings};
pub use types::{
    AuthorizationGrantType, ClientAuthenticationMethod, generate_registration_id,
    generate_token,
};

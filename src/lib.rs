//! Registered OAuth client library crate.
//!
//! Models the registration of an OAuth 2.0 client with an authorization server
//! and validates it before it can be used as configuration.

pub mod config;
pub mod errors;
pub mod oauth;

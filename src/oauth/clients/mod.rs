//! OAuth client registrations.
//!
//! A [`RegisteredClient`] is only ever produced by a [`RegisteredClientBuilder`],
//! which validates the registration before handing it out.

pub mod builder;
pub mod registered_client;

// Re-export main types
pub use builder::RegisteredClientBuilder;
pub use registered_client::RegisteredClient;

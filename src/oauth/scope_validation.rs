//! OAuth scope token validation.
//!
//! A scope token is restricted to `%x21 / %x23-5B / %x5D-7E` (RFC 6749 section 3.3):
//! printable ASCII without space, double quote or backslash.

use crate::errors::ClientRegistrationError;

/// Check that every character of `scope` is a legal scope-token character.
///
/// The empty string passes, there is no character to reject.
pub fn is_valid_scope(scope: &str) -> bool {
    scope.chars().all(is_scope_char)
}

fn is_scope_char(c: char) -> bool {
    matches!(c, '\u{21}' | '\u{23}'..='\u{5B}' | '\u{5D}'..='\u{7E}')
}

/// Validate every scope, failing on the first one with an illegal character.
pub fn validate_scopes<'a>(
    scopes: impl IntoIterator<Item = &'a String>,
) -> Result<(), ClientRegistrationError> {
    for scope in scopes {
        if !is_valid_scope(scope) {
            return Err(ClientRegistrationError::invalid_argument(
                "scope",
                format!("scope \"{}\" contains invalid characters", scope),
            ));
        }
    }
    Ok(())
}

//! Redirect URI validation for client registrations.
//!
//! A registered redirect URI must be a syntactically valid URI reference
//! (RFC 3986 section 4.1) and must not carry a fragment component
//! (RFC 6749 section 3.1.2).

use url::Url;

use crate::errors::ClientRegistrationError;

/// Base used to resolve relative references so they can be parsed.
const REFERENCE_BASE: &str = "https://reference.invalid/";

/// Check that `redirect_uri` is a URI reference without a fragment.
pub fn is_valid_redirect_uri(redirect_uri: &str) -> bool {
    if !has_uri_reference_syntax(redirect_uri) {
        return false;
    }

    match parse_uri_reference(redirect_uri) {
        Some(parsed) => parsed.fragment().is_none(),
        None => false,
    }
}

/// Validate every redirect URI, failing on the first invalid one.
pub fn validate_redirect_uris<'a>(
    redirect_uris: impl IntoIterator<Item = &'a String>,
) -> Result<(), ClientRegistrationError> {
    for redirect_uri in redirect_uris {
        if !is_valid_redirect_uri(redirect_uri) {
            return Err(ClientRegistrationError::invalid_argument(
                "redirectUri",
                format!(
                    "redirect_uri \"{}\" is not a valid redirect URI or contains fragment",
                    redirect_uri
                ),
            ));
        }
    }
    Ok(())
}

/// The `url` crate percent-encodes characters that RFC 3986 forbids instead of
/// rejecting them, so the raw reference is checked first.
fn has_uri_reference_syntax(uri: &str) -> bool {
    let rest = match split_scheme(uri) {
        Some((scheme, rest)) if is_valid_scheme(scheme) => rest,
        Some(_) => return false,
        None => uri,
    };

    let (authority, remainder) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after
                .find(|c: char| matches!(c, '/' | '?' | '#'))
                .unwrap_or(after.len());
            (Some(&after[..end]), &after[end..])
        }
        None => (None, rest),
    };

    authority.is_none_or(has_authority_syntax) && has_uri_characters(remainder)
}

/// A `:` before the first `/`, `?` or `#` ends the scheme.
fn split_scheme(uri: &str) -> Option<(&str, &str)> {
    let end = uri.find(|c: char| matches!(c, ':' | '/' | '?' | '#'))?;
    uri[end..]
        .starts_with(':')
        .then(|| (&uri[..end], &uri[end + 1..]))
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Brackets are only allowed around an IP-literal host.
fn has_authority_syntax(authority: &str) -> bool {
    let (userinfo, host_port) = authority.rsplit_once('@').unwrap_or(("", authority));
    if userinfo.contains('@') || !has_uri_characters(userinfo) {
        return false;
    }

    match host_port.strip_prefix('[') {
        Some(literal) => {
            let Some((address, port)) = literal.split_once(']') else {
                return false;
            };
            let port_ok = match port.strip_prefix(':') {
                Some(digits) => digits.chars().all(|c| c.is_ascii_digit()),
                None => port.is_empty(),
            };
            !address.is_empty() && has_uri_characters(address) && port_ok
        }
        None => has_uri_characters(host_port),
    }
}

fn has_uri_characters(part: &str) -> bool {
    let mut chars = part.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => {
                let high = chars.next().filter(char::is_ascii_hexdigit);
                let low = chars.next().filter(char::is_ascii_hexdigit);
                if high.is_none() || low.is_none() {
                    return false;
                }
            }
            c if c.is_ascii_alphanumeric() => {}
            '-' | '.' | '_' | '~' => {}
            ':' | '/' | '?' | '#' | '@' => {}
            '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' => {}
            c if !c.is_ascii() && !c.is_control() && !c.is_whitespace() => {}
            _ => return false,
        }
    }
    true
}

fn parse_uri_reference(uri: &str) -> Option<Url> {
    match Url::parse(uri) {
        // `scheme:` alone has no scheme-specific part
        Ok(parsed) if parsed.cannot_be_a_base() && parsed.path().is_empty() => None,
        Ok(parsed) => Some(parsed),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(REFERENCE_BASE).ok()?.join(uri).ok()
        }
        Err(_) => None,
    }
}

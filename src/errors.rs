//! Standardized error types following the `error-rc-<domain>-<number>` format.

use thiserror::Error;

/// Configuration errors that occur while reading the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when version information is not available
    #[error("error-rc-config-1 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,

    /// Error when duration string cannot be parsed
    #[error("error-rc-config-2 Failed to parse duration '{0}': {1}")]
    DurationParsingFailed(String, String),

    /// Error when boolean string cannot be parsed
    #[error(
        "error-rc-config-3 Failed to parse boolean '{0}': expected true/false/1/0/yes/no/on/off"
    )]
    BoolParsingFailed(String),

    /// Error when a configured duration is zero or negative
    #[error("error-rc-config-4 Duration for {0} must be positive")]
    NonPositiveDuration(String),
}

/// Client registration errors
///
/// Every precondition failure during builder construction or `build` maps onto
/// the single `InvalidArgument` kind. `argument` names the field that failed and
/// `reason` carries the offending value when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientRegistrationError {
    /// A builder argument or the accumulated builder state is invalid
    #[error("error-rc-client-1 Invalid argument {argument}: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
}

impl ClientRegistrationError {
    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// The name of the argument that failed validation.
    pub fn argument(&self) -> &'static str {
        match self {
            Self::InvalidArgument { argument, .. } => argument,
        }
    }

    /// The human readable reason for the failure.
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidArgument { reason, .. } => reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientRegistrationError>;

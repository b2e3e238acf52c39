//! Error types shared by every stratum crate.

use thiserror::Error;

/// Errors raised while building or executing a statement.
///
/// Validation errors are raised before any SQL is produced and before any
/// driver call is made. They indicate a bug at the call site rather than a
/// transient condition and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An argument failed validation.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The driver rejected a prepare or execute call. Carries only the
    /// driver's own message.
    #[error("driver error: {0}")]
    Driver(String),

    /// Opening a connection failed. The message has been scrubbed of
    /// credentials and connection URLs.
    #[error("connection error: {0}")]
    Connection(String),
}

impl Error {
    /// Creates an [`Error::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Returns true for errors raised by argument validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Result type alias for stratum operations.
pub type Result<T> = std::result::Result<T, Error>;

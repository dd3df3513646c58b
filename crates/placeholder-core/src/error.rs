//! Error types for the placeholder core.
//!
//! The public registration surface is fail-soft: it reports these errors as
//! `false`/`0` plus a log line instead of returning them. The variants exist
//! so that lower layers can propagate a reason with `?`.
//!
//! A well-formed `{token}` that matches nothing is *not* an error; it is
//! passed through verbatim by the resolver.

use thiserror::Error;

/// Errors produced by registration and lookup operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    /// An argument was empty, malformed, or otherwise unusable.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: String,
    },

    /// Resolution or counting was requested while no provider is registered.
    #[error("no placeholder provider installed")]
    NoProviderAvailable,
}

impl PlaceholderError {
    /// Creates an invalid argument error with the given reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Result type for placeholder operations.
pub type PlaceholderResult<T> = Result<T, PlaceholderError>;

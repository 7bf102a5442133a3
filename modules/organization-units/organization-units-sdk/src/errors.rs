//! Public error types for the organization units module.
//!
//! These errors are safe to expose to other modules and consumers; backing
//! store details never leak through them.

use thiserror::Error;

/// Errors that can be returned by the `OrganizationUnitsClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrganizationUnitsError {
    /// No organization unit with the given identifier.
    #[error("Organization unit not found: {id}")]
    NotFound { id: String },

    /// A handle path did not resolve.
    #[error("Organization unit not found for path: {path}")]
    PathNotFound { path: String },

    /// The write would collide with an existing handle, name or identifier.
    #[error("Organization unit {field} '{value}' already exists")]
    Conflict { field: String, value: String },

    /// The target is defined declaratively and cannot be modified.
    #[error("Organization unit '{id}' is read-only")]
    Immutable { id: String },

    /// A composite listing exceeded the configured safety ceiling.
    #[error("Result limit of {ceiling} records exceeded in composite mode")]
    ResultLimitExceeded { ceiling: u64 },

    /// The request is invalid.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl OrganizationUnitsError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn immutable(id: impl Into<String>) -> Self {
        Self::Immutable { id: id.into() }
    }

    #[must_use]
    pub fn result_limit_exceeded(ceiling: u64) -> Self {
        Self::ResultLimitExceeded { ceiling }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }

    /// Whether the caller can fix the request (as opposed to a server fault).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal)
    }
}

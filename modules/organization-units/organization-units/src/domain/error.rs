use declarative_resources::ResultLimitExceeded;
use organization_units_sdk::OrganizationUnitsError;
use sea_orm::DbErr;
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Organization unit not found: {id}")]
    NotFound { id: String },

    #[error("Organization unit not found for path: {path}")]
    PathNotFound { path: String },

    #[error("Parent organization unit not found: {parent}")]
    ParentNotFound { parent: String },

    #[error("Organization unit with id '{id}' already exists")]
    IdConflict { id: String },

    #[error("Organization unit with handle '{handle}' already exists under the same parent")]
    HandleConflict { handle: String },

    #[error("Organization unit with name '{name}' already exists under the same parent")]
    NameConflict { name: String },

    #[error("Organization unit '{id}' is declarative and cannot be modified")]
    Immutable { id: String },

    #[error("Operation '{operation}' on '{id}' is not supported by the declarative store")]
    Unsupported { operation: &'static str, id: String },

    #[error("Organization unit '{id}' cannot be its own ancestor")]
    CircularReference { id: String },

    #[error("Organization unit '{id}' still has children, users or groups")]
    HasChildResources { id: String },

    #[error(transparent)]
    ResultLimitExceeded(#[from] ResultLimitExceeded),

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    pub fn parent_not_found(parent: impl Into<String>) -> Self {
        Self::ParentNotFound {
            parent: parent.into(),
        }
    }

    pub fn id_conflict(id: impl Into<String>) -> Self {
        Self::IdConflict { id: id.into() }
    }

    pub fn handle_conflict(handle: impl Into<String>) -> Self {
        Self::HandleConflict {
            handle: handle.into(),
        }
    }

    pub fn name_conflict(name: impl Into<String>) -> Self {
        Self::NameConflict { name: name.into() }
    }

    pub fn immutable(id: impl Into<String>) -> Self {
        Self::Immutable { id: id.into() }
    }

    pub fn unsupported(operation: &'static str, id: impl Into<String>) -> Self {
        Self::Unsupported {
            operation,
            id: id.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::PathNotFound { .. })
    }

    /// Whether the error reports a write against a read-only unit.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Immutable { .. } | Self::Unsupported { .. })
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::IdConflict { .. } | Self::HandleConflict { .. } | Self::NameConflict { .. }
        )
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::Type(msg) => DomainError::internal(format!("row conversion failed: {msg}")),
            other => DomainError::database(other.to_string()),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for OrganizationUnitsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { id } => Self::not_found(id),
            DomainError::PathNotFound { path } => Self::path_not_found(path),
            DomainError::ParentNotFound { parent } => {
                Self::validation(format!("parent organization unit '{parent}' does not exist"))
            }
            DomainError::IdConflict { id } => Self::conflict("id", id),
            DomainError::HandleConflict { handle } => Self::conflict("handle", handle),
            DomainError::NameConflict { name } => Self::conflict("name", name),
            DomainError::Immutable { id } | DomainError::Unsupported { id, .. } => {
                Self::immutable(id)
            }
            DomainError::CircularReference { id } => Self::validation(format!(
                "organization unit '{id}' cannot be moved under itself or its descendants"
            )),
            DomainError::HasChildResources { id } => Self::validation(format!(
                "organization unit '{id}' still has children, users or groups"
            )),
            DomainError::ResultLimitExceeded(e) => Self::result_limit_exceeded(e.ceiling),
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::Database { .. } | DomainError::Internal(_) => Self::internal(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn database_details_do_not_leak() {
        let sdk: OrganizationUnitsError =
            DomainError::database("near \"SELEC\": syntax error").into();
        assert_eq!(sdk, OrganizationUnitsError::Internal);
    }

    #[test]
    fn type_errors_are_conversion_failures() {
        let err = DomainError::from(DbErr::Type("expected TEXT".to_owned()));
        assert!(matches!(err, DomainError::Internal(ref m) if m.contains("conversion")));
    }

    #[test]
    fn immutable_and_conflict_are_distinguishable() {
        let immutable: OrganizationUnitsError = DomainError::immutable("ou-eng").into();
        let conflict: OrganizationUnitsError = DomainError::handle_conflict("engineering").into();
        let limit: OrganizationUnitsError = DomainError::from(ResultLimitExceeded {
            ceiling: 1000,
            candidates: 1010,
        })
        .into();

        assert_eq!(immutable, OrganizationUnitsError::immutable("ou-eng"));
        assert_eq!(
            conflict,
            OrganizationUnitsError::conflict("handle", "engineering")
        );
        assert_eq!(limit, OrganizationUnitsError::result_limit_exceeded(1000));
    }
}

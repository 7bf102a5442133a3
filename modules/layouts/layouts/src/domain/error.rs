use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Layout not found: {id}")]
    NotFound { id: String },

    #[error("Layout with id '{id}' already exists")]
    IdConflict { id: String },

    #[error("Layout with name '{name}' already exists")]
    NameConflict { name: String },

    #[error("Layout '{id}' is declarative and cannot be modified")]
    Immutable { id: String },

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

    pub fn id_conflict(id: impl Into<String>) -> Self {
        Self::IdConflict { id: id.into() }
    }

    pub fn name_conflict(name: impl Into<String>) -> Self {
        Self::NameConflict { name: name.into() }
    }

    pub fn immutable(id: impl Into<String>) -> Self {
        Self::Immutable { id: id.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e {
            DbErr::Type(msg) => DomainError::internal(format!("row conversion failed: {msg}")),
            other => DomainError::Database {
                message: other.to_string(),
            },
        }
    }
}

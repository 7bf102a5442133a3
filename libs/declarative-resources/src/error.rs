use thiserror::Error;

/// Startup-fatal failures of the declarative loader.
///
/// The process must not serve with a partially loaded declarative
/// configuration, so every variant aborts loading of the kind.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to discover {kind} resources in '{directory}': {message}")]
    Discovery {
        kind: String,
        directory: String,
        message: String,
    },

    #[error("failed to parse {kind} resource '{file}': {message}")]
    Parse {
        kind: String,
        file: String,
        message: String,
    },

    #[error("invalid {kind} resource '{id}': {source}")]
    Validation {
        kind: String,
        id: String,
        #[source]
        source: ValidationError,
    },

    #[error("duplicate {kind} resource id '{id}'")]
    DuplicateId { kind: String, id: String },

    #[error("{kind} resource '{id}' is part of a parent cycle")]
    DependencyCycle { kind: String, id: String },
}

impl LoaderError {
    pub fn parse(
        kind: impl Into<String>,
        file: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            kind: kind.into(),
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn validation(kind: impl Into<String>, id: impl Into<String>, source: ValidationError) -> Self {
        Self::Validation {
            kind: kind.into(),
            id: id.into(),
            source,
        }
    }
}

/// Returned by [`ResourceHandler::validate`](crate::ResourceHandler::validate).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' is required")]
    MissingField { field: String },

    #[error("id '{id}' already exists")]
    DuplicateId { id: String },

    #[error("parent '{parent}' is not defined")]
    UnknownParent { parent: String },

    #[error("{field} '{value}' is already used under the same parent")]
    Conflict { field: String, value: String },

    #[error("{0}")]
    Invalid(String),
}

impl ValidationError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }

    pub fn conflict(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A composite listing would have to materialize more records than allowed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("result limit exceeded in composite mode: {candidates} candidates, ceiling is {ceiling}")]
pub struct ResultLimitExceeded {
    pub ceiling: u64,
    pub candidates: u64,
}

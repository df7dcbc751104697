use thiserror::Error;

use crate::model::{EntityKind, Id};

/// Errors surfaced by the console's list, form and delete flows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsoleError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: Id },

    #[error("{kind} field '{field}' is required")]
    MissingField { kind: EntityKind, field: &'static str },

    #[error("Invalid filter {key}={value}")]
    InvalidFilter { key: String, value: String },

    #[error("Invalid {kind} draft: {message}")]
    InvalidDraft { kind: EntityKind, message: String },

    #[error("Deleting {kind} {id} requires confirmation")]
    ConfirmationRequired { kind: EntityKind, id: Id },
}

impl ConsoleError {
    pub fn invalid_filter(key: &str, value: &str) -> Self {
        Self::InvalidFilter {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

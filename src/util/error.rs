use serde::Serialize;

use crate::dto::quote_dto::QuoteField;
use crate::repository::repository_error::RepositoryError;

/// A single invalid form field and the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: QuoteField,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    #[error("Missing contact: {0}")]
    MissingContact(String),

    #[error("Submission failed: {0}")]
    Submission(String),
}

impl QuoteError {
    /// Field errors carried by a validation failure; empty otherwise.
    pub fn field_errors(&self) -> &[ValidationError] {
        match self {
            QuoteError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<RepositoryError> for QuoteError {
    fn from(err: RepositoryError) -> Self {
        QuoteError::Submission(err.to_string())
    }
}

//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing or hidden. Callers cannot tell the two apart.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Repository error: {0}")]
    Repo(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

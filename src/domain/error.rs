//! Domain error taxonomy
//!
//! No flow error is fatal to the process: input and session problems are
//! recovered by re-prompting or resetting the conversation, storage problems
//! surface a generic retry message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// User input that cannot be parsed in the current state.
    /// Recovered locally by re-prompting the same state.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A prior field the flow depends on is absent (e.g. no address
    /// selected yet). The flow is aborted and the session cleared.
    #[error("Missing session data: {0}")]
    MissingSessionData(&'static str),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether the error aborts the current flow (as opposed to a local
    /// re-prompt of the same state).
    pub fn aborts_flow(&self) -> bool {
        !matches!(self, DomainError::InvalidInput(_))
    }
}

use thiserror::Error;

/// Raised when a field assignment would leave a record in an invalid state.
/// Always detected before anything reaches the database.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be null")]
    MissingField { field: &'static str },

    #[error("{field} must be a non-empty string")]
    EmptyField { field: &'static str },
}

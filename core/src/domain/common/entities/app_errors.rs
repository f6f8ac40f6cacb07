use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("{0}")]
    ExternalServiceError(String),

    #[error("Invalid: {0}")]
    Invalid(String),
}

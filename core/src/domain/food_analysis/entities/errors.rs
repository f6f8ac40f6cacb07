use thiserror::Error;

/// Failure of a single image analysis, already rendered for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Failed to analyze image: {0}")]
    Failed(String),
}

impl AnalysisError {
    pub fn failed(cause: impl std::fmt::Display) -> Self {
        Self::Failed(cause.to_string())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

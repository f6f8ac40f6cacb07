use thiserror::Error;

use crate::domain::{nutrition::value_objects::ValidationError, session::entities::SessionView};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Cannot {action} while in the {state} view")]
    InvalidTransition {
        action: &'static str,
        state: SessionView,
    },

    #[error("An analysis is already in progress")]
    AnalysisInProgress,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

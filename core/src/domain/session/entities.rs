use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    food_analysis::entities::EncodedImage,
    nutrition::entities::{EntrySource, FoodEntry},
};

/// Which screen is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionView {
    Input,
    ConfirmImage,
    Loading,
    Results,
}

impl std::fmt::Display for SessionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionView::Input => "input",
            SessionView::ConfirmImage => "confirm_image",
            SessionView::Loading => "loading",
            SessionView::Results => "results",
        };
        f.write_str(name)
    }
}

/// The image the user picked, waiting to be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PendingImage {
    pub file_name: Option<String>,
    pub image: EncodedImage,
}

impl PendingImage {
    pub fn new(image: EncodedImage, file_name: Option<String>) -> Self {
        Self { file_name, image }
    }
}

/// Entries shown on the results screen, plus the error when analysis failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsData {
    pub source: EntrySource,
    pub entries: Vec<FoodEntry>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SessionState {
    Input {
        error: Option<String>,
    },
    ConfirmImage {
        pending: PendingImage,
    },
    Loading {
        pending: PendingImage,
    },
    Results {
        pending: Option<PendingImage>,
        data: ResultsData,
    },
}

impl SessionState {
    pub(crate) fn view(&self) -> SessionView {
        match self {
            SessionState::Input { .. } => SessionView::Input,
            SessionState::ConfirmImage { .. } => SessionView::ConfirmImage,
            SessionState::Loading { .. } => SessionView::Loading,
            SessionState::Results { .. } => SessionView::Results,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Input { error: None }
    }
}

/// Handed out when an analysis starts; a completion is only accepted for
/// the epoch it was issued in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    pub(crate) epoch: u64,
    pub image: EncodedImage,
}

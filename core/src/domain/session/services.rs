use crate::domain::{
    food_analysis::{
        entities::AnalysisError, ports::FoodAnalysisService, value_objects::AnalyzeImageInput,
    },
    nutrition::{
        entities::{EntrySource, FoodEntry, Totals},
        helpers::from_manual,
        services::{aggregate, estimate_dose},
        value_objects::{InsulinRatio, ManualEntryInput, ValidationError},
    },
    session::{
        entities::{AnalysisTicket, PendingImage, ResultsData, SessionState, SessionView},
        errors::SessionError,
        render::{ResultsView, details_allowed, render_results},
    },
};

/// State machine behind the single user session.
///
/// `Input -> ConfirmImage -> Loading -> Results`, with `ConfirmImage -> Input`
/// (change image), `Input -> Results` (manual entry) and `reset` from anywhere.
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    state: SessionState,
    details_visible: bool,
    ratio: InsulinRatio,
    epoch: u64,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn details_visible(&self) -> bool {
        self.details_visible
    }

    pub fn ratio(&self) -> InsulinRatio {
        self.ratio
    }

    pub fn pending_image(&self) -> Option<&PendingImage> {
        match &self.state {
            SessionState::ConfirmImage { pending } | SessionState::Loading { pending } => {
                Some(pending)
            }
            SessionState::Results { pending, .. } => pending.as_ref(),
            SessionState::Input { .. } => None,
        }
    }

    /// Present only on the results screen.
    pub fn entries(&self) -> Option<&[FoodEntry]> {
        match &self.state {
            SessionState::Results { data, .. } => Some(&data.entries),
            _ => None,
        }
    }

    pub fn entry_source(&self) -> Option<EntrySource> {
        match &self.state {
            SessionState::Results { data, .. } => Some(data.source),
            _ => None,
        }
    }

    /// Inline validation message on the input screen, or the analysis error
    /// on the results screen.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Input { error } => error.as_deref(),
            SessionState::Results { data, .. } => data.error.as_deref(),
            _ => None,
        }
    }

    pub fn totals(&self) -> Totals {
        self.entries().map(aggregate).unwrap_or_default()
    }

    pub fn dose(&self) -> f64 {
        estimate_dose(self.totals().carbohydrates, self.ratio.value())
    }

    pub fn results(&self) -> Option<ResultsView> {
        match &self.state {
            SessionState::Results { data, .. } => {
                Some(render_results(data, self.ratio, self.details_visible))
            }
            _ => None,
        }
    }

    pub fn select_image(&mut self, pending: PendingImage) -> Result<(), SessionError> {
        self.expect_view("select an image", SessionView::Input)?;

        tracing::debug!(mime_type = %pending.image.mime_type, "image selected");
        self.state = SessionState::ConfirmImage { pending };
        Ok(())
    }

    pub fn change_image(&mut self) -> Result<(), SessionError> {
        self.expect_view("change the image", SessionView::ConfirmImage)?;

        self.state = SessionState::Input { error: None };
        Ok(())
    }

    /// Moves to `Loading` and hands out the image to analyze.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, SessionError> {
        let pending = match &self.state {
            SessionState::ConfirmImage { pending } => pending.clone(),
            SessionState::Loading { .. } => return Err(SessionError::AnalysisInProgress),
            other => {
                return Err(SessionError::InvalidTransition {
                    action: "analyze",
                    state: other.view(),
                });
            }
        };

        let ticket = AnalysisTicket {
            epoch: self.epoch,
            image: pending.image.clone(),
        };
        self.state = SessionState::Loading { pending };
        tracing::debug!(epoch = self.epoch, "analysis started");

        Ok(ticket)
    }

    /// Settles a running analysis. Failures land on the results screen with
    /// no entries and the error message. Returns false when the ticket is
    /// stale (the session was reset meanwhile) and the outcome was dropped.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<Vec<FoodEntry>, AnalysisError>,
    ) -> bool {
        let pending = match &self.state {
            SessionState::Loading { pending } if ticket.epoch == self.epoch => pending.clone(),
            other => {
                tracing::warn!(
                    ticket_epoch = ticket.epoch,
                    epoch = self.epoch,
                    state = %other.view(),
                    "discarding stale analysis result"
                );
                return false;
            }
        };

        let (entries, error) = match outcome {
            Ok(entries) => (entries, None),
            Err(e) => (Vec::new(), Some(e.message())),
        };

        tracing::debug!(
            items = entries.len(),
            failed = error.is_some(),
            "analysis finished"
        );
        self.details_visible = false;
        self.state = SessionState::Results {
            pending: Some(pending),
            data: ResultsData {
                source: EntrySource::Analysis,
                entries,
                error,
            },
        };

        true
    }

    /// Runs the whole `ConfirmImage -> Loading -> Results` cycle.
    pub async fn analyze<S>(&mut self, service: &S) -> Result<(), SessionError>
    where
        S: FoodAnalysisService,
    {
        let ticket = self.begin_analysis()?;
        let outcome = service
            .analyze_image(AnalyzeImageInput {
                image: ticket.image.clone(),
            })
            .await;
        self.complete_analysis(ticket, outcome);

        Ok(())
    }

    /// Direct `Input -> Results` path. Invalid numbers keep the session on
    /// the input screen with an inline message.
    pub fn submit_manual(
        &mut self,
        total_grams: f64,
        carbs_per_100g: f64,
    ) -> Result<(), SessionError> {
        self.expect_view("submit a manual entry", SessionView::Input)?;

        let input = ManualEntryInput::new(total_grams, carbs_per_100g)
            .map_err(|e| self.reject_manual(e))?;
        self.accept_manual(&input);
        Ok(())
    }

    /// Same as `submit_manual`, from raw form text.
    pub fn submit_manual_text(
        &mut self,
        total_grams: &str,
        carbs_per_100g: &str,
    ) -> Result<(), SessionError> {
        self.expect_view("submit a manual entry", SessionView::Input)?;

        let input = ManualEntryInput::parse(total_grams, carbs_per_100g)
            .map_err(|e| self.reject_manual(e))?;
        self.accept_manual(&input);
        Ok(())
    }

    /// The dose is derived, so nothing else needs recomputing.
    pub fn set_ratio(&mut self, value: f64) -> Result<InsulinRatio, SessionError> {
        self.ratio = InsulinRatio::new(value)?;
        Ok(self.ratio)
    }

    /// Returns the new visibility. Stays hidden for manual entries and empty
    /// results.
    pub fn toggle_details(&mut self) -> Result<bool, SessionError> {
        let SessionState::Results { data, .. } = &self.state else {
            return Err(SessionError::InvalidTransition {
                action: "toggle details",
                state: self.view(),
            });
        };

        self.details_visible = details_allowed(data) && !self.details_visible;
        Ok(self.details_visible)
    }

    pub fn reset(&mut self) {
        if matches!(self.state, SessionState::Loading { .. }) {
            tracing::warn!("session reset while an analysis is still running");
        }

        self.state = SessionState::default();
        self.details_visible = false;
        self.ratio = InsulinRatio::default();
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn expect_view(&self, action: &'static str, expected: SessionView) -> Result<(), SessionError> {
        let current = self.view();
        if current != expected {
            return Err(SessionError::InvalidTransition {
                action,
                state: current,
            });
        }
        Ok(())
    }

    fn reject_manual(&mut self, error: ValidationError) -> SessionError {
        self.state = SessionState::Input {
            error: Some(error.to_string()),
        };
        SessionError::Validation(error)
    }

    fn accept_manual(&mut self, input: &ManualEntryInput) {
        let entry = from_manual(input);
        tracing::debug!(carbohydrates = entry.carbohydrates(), "manual entry accepted");

        self.details_visible = false;
        self.state = SessionState::Results {
            pending: None,
            data: ResultsData {
                source: EntrySource::Manual,
                entries: vec![entry],
                error: None,
            },
        };
    }
}

use axum::extract::State;
use carbvision_core::domain::{
    nutrition::value_objects::InsulinRatio,
    session::{SessionController, SessionView, render::ResultsView},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct ImageSummary {
    pub file_name: Option<String>,
    pub mime_type: String,
}

/// Snapshot of the session as the front-end renders it.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct SessionResponse {
    pub view: SessionView,
    pub details_visible: bool,
    pub ratio: InsulinRatio,
    pub dose_units: f64,
    pub error: Option<String>,
    pub image: Option<ImageSummary>,
    pub results: Option<ResultsView>,
}

impl From<&SessionController> for SessionResponse {
    fn from(session: &SessionController) -> Self {
        Self {
            view: session.view(),
            details_visible: session.details_visible(),
            ratio: session.ratio(),
            dose_units: session.dose(),
            error: session.error().map(str::to_string),
            image: session.pending_image().map(|pending| ImageSummary {
                file_name: pending.file_name.clone(),
                mime_type: pending.image.mime_type.clone(),
            }),
            results: session.results(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/session",
    tag = "session",
    summary = "Get the current session",
    responses(
        (status = 200, body = SessionResponse)
    ),
)]
pub async fn get_session(
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let session = state.session.lock().await;

    Ok(Response::OK(SessionResponse::from(&*session)))
}

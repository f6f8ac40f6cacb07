use axum::extract::State;
use carbvision_core::domain::food_analysis::{
    ports::FoodAnalysisService, value_objects::AnalyzeImageInput,
};

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::SessionResponse,
};

#[utoipa::path(
    post,
    path = "/session/analyze",
    tag = "session",
    summary = "Analyze the selected image",
    description = "Runs the provider call for the confirmed image. Provider failures are reported inside the results, not as HTTP errors.",
    responses(
        (status = 200, body = SessionResponse),
        (status = 409, description = "No confirmed image, or an analysis is already running")
    ),
)]
pub async fn analyze_image(
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let ticket = state.session.lock().await.begin_analysis()?;

    // The provider call runs detached so that a dropped request still
    // settles the session. The lock is not held while it is in flight.
    let service = state.service.clone();
    let session = state.session.clone();
    let task = tokio::spawn(async move {
        let outcome = service
            .analyze_image(AnalyzeImageInput {
                image: ticket.image.clone(),
            })
            .await;

        let mut session = session.lock().await;
        session.complete_analysis(ticket, outcome);
        SessionResponse::from(&*session)
    });

    let snapshot = task
        .await
        .map_err(|e| ApiError::InternalServerError(format!("Analysis task failed: {}", e)))?;

    Ok(Response::OK(snapshot))
}

use axum::extract::State;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    session::{handlers::get_session::SessionResponse, validators::ManualEntryRequest},
};

#[utoipa::path(
    post,
    path = "/session/manual",
    tag = "session",
    summary = "Calculate carbohydrates from a manual entry",
    responses(
        (status = 200, body = SessionResponse),
        (status = 400, description = "Values are not valid non-negative numbers")
    ),
    request_body = ManualEntryRequest
)]
pub async fn submit_manual(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ManualEntryRequest>,
) -> Result<Response<SessionResponse>, ApiError> {
    let mut session = state.session.lock().await;
    session.submit_manual_text(&payload.total_grams_text(), &payload.carbs_per_100g_text())?;

    Ok(Response::OK(SessionResponse::from(&*session)))
}

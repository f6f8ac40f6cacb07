use axum::extract::State;

use crate::application::http::{
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
    session::{handlers::get_session::SessionResponse, validators::UpdateRatioRequest},
};

#[utoipa::path(
    put,
    path = "/session/ratio",
    tag = "session",
    summary = "Set the carb-to-insulin ratio",
    description = "The dose is recomputed from the current entries; no new analysis is made",
    responses(
        (status = 200, body = SessionResponse),
        (status = 400, description = "Ratio outside 1..=50")
    ),
    request_body = UpdateRatioRequest
)]
pub async fn update_ratio(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<UpdateRatioRequest>,
) -> Result<Response<SessionResponse>, ApiError> {
    let mut session = state.session.lock().await;
    session.set_ratio(payload.ratio)?;

    Ok(Response::OK(SessionResponse::from(&*session)))
}

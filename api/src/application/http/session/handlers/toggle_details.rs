use axum::extract::State;

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::SessionResponse,
};

#[utoipa::path(
    post,
    path = "/session/details",
    tag = "session",
    summary = "Show or hide per-item macro details",
    responses(
        (status = 200, body = SessionResponse),
        (status = 409, description = "Session is not showing results")
    ),
)]
pub async fn toggle_details(
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let mut session = state.session.lock().await;
    session.toggle_details()?;

    Ok(Response::OK(SessionResponse::from(&*session)))
}

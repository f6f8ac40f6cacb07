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
    path = "/session/reset",
    tag = "session",
    summary = "Start over",
    responses(
        (status = 200, body = SessionResponse)
    ),
)]
pub async fn reset_session(
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let mut session = state.session.lock().await;
    session.reset();
    tracing::info!("session reset");

    Ok(Response::OK(SessionResponse::from(&*session)))
}

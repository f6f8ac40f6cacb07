use axum::extract::State;

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::SessionResponse,
};

#[utoipa::path(
    delete,
    path = "/session/image",
    tag = "session",
    summary = "Drop the selected image and go back to input",
    responses(
        (status = 200, body = SessionResponse),
        (status = 409, description = "No image is waiting for confirmation")
    ),
)]
pub async fn change_image(
    State(state): State<AppState>,
) -> Result<Response<SessionResponse>, ApiError> {
    let mut session = state.session.lock().await;
    session.change_image()?;

    Ok(Response::OK(SessionResponse::from(&*session)))
}

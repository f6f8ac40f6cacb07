use axum::extract::{Multipart, State};
use carbvision_core::domain::{
    food_analysis::entities::EncodedImage, session::entities::PendingImage,
};

use crate::application::http::{
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    session::handlers::get_session::SessionResponse,
};

const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[utoipa::path(
    post,
    path = "/session/image",
    tag = "session",
    summary = "Select the food image",
    description = "Accepts a multipart `image` file field, or a `data_uri` text field, and moves the session to image confirmation",
    responses(
        (status = 200, body = SessionResponse)
    ),
)]
pub async fn select_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<SessionResponse>, ApiError> {
    let mut pending: Option<PendingImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "image" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

                if data.len() > MAX_IMAGE_SIZE {
                    return Err(ApiError::BadRequest(format!(
                        "Image too large. Max size is {} bytes",
                        MAX_IMAGE_SIZE
                    )));
                }

                let image = EncodedImage::from_bytes(&data, content_type.as_deref());
                pending = Some(PendingImage::new(image, file_name));
            }
            "data_uri" => {
                let value = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read data_uri: {}", e))
                })?;
                let image = EncodedImage::from_data_uri(&value)
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
                pending = Some(PendingImage::new(image, None));
            }
            _ => {}
        }
    }

    let pending = pending.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let mut session = state.session.lock().await;
    session.select_image(pending)?;

    Ok(Response::OK(SessionResponse::from(&*session)))
}

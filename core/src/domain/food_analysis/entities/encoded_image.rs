use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// An image in provider transport form: mime type plus a bare base64 payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8], mime_type: Option<&str>) -> Self {
        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE);

        Self {
            mime_type: mime_type.to_string(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Accepts `data:<mime>;base64,<payload>` and keeps only the payload.
    pub fn from_data_uri(uri: &str) -> Result<Self, CoreError> {
        let (header, payload) = uri
            .split_once(',')
            .ok_or_else(|| CoreError::Invalid("data URI has no payload".to_string()))?;

        let header = header
            .strip_prefix("data:")
            .ok_or_else(|| CoreError::Invalid("not a data URI".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| CoreError::Invalid("data URI is not base64 encoded".to_string()))?;

        let image = Self {
            mime_type: if mime_type.is_empty() {
                DEFAULT_IMAGE_MIME_TYPE.to_string()
            } else {
                mime_type.to_string()
            },
            data: payload.trim().to_string(),
        };
        image.decode()?;

        Ok(image)
    }

    pub fn decode(&self) -> Result<Vec<u8>, CoreError> {
        general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| CoreError::Invalid(format!("invalid base64 payload: {}", e)))
    }
}

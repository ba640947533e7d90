//! Image upload route

use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Accept a multipart `image` field and store it in the object store
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::InvalidArgument("malformed multipart body".to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(ApiError::InvalidArgument(
                "file must be an image".to_string(),
            ));
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| ApiError::InvalidArgument("failed to read upload".to_string()))?;

        let image_url = state
            .storage
            .upload_image(data.to_vec(), &content_type, &file_name)
            .await
            .map_err(|e| {
                error!("Upload failed: {}", e);
                ApiError::Internal
            })?;

        return Ok(Json(json!({ "image_url": image_url })));
    }

    Err(ApiError::InvalidArgument("no file uploaded".to_string()))
}

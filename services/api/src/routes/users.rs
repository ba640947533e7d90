//! User profile and favorites routes

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{UpdateProfile, UserResponse},
    state::AppState,
};

/// Request to toggle a favorite
#[derive(Deserialize)]
pub struct ToggleFavoriteRequest {
    pub toy_id: String,
}

/// Fetch a user's public profile
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user_id = parse_user_id(&id)?;

    let user = state
        .user_repository
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(UserResponse::from(user)))
}

/// Update the authenticated user's own profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProfile>,
) -> ApiResult<impl IntoResponse> {
    let user_id = parse_user_id(&id)?;
    if auth.id != user_id {
        return Err(ApiError::Forbidden);
    }

    let user = state
        .user_repository
        .update_profile(user_id, &payload)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    Ok(Json(UserResponse::from(user)))
}

/// Flip a toy in the user's favorite set; responds with the updated id list
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleFavoriteRequest>,
) -> ApiResult<impl IntoResponse> {
    let user_id = parse_user_id(&id)?;

    let favorites = state.favorites.toggle(user_id, &payload.toy_id).await?;

    Ok(Json(favorites))
}

fn parse_user_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::InvalidArgument("invalid user id".to_string()))
}

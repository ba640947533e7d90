//! Toy listing routes

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{Toy, ToyResponse},
    state::AppState,
};

/// Default radius for the proximity query, in meters
const DEFAULT_MAX_DISTANCE_M: i64 = 15_000;

/// Request to create a toy listing
#[derive(Deserialize)]
pub struct CreateToyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Query parameters for the proximity search
#[derive(Deserialize)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub max_distance: Option<i64>,
}

/// Request for bulk toy lookup
#[derive(Deserialize)]
pub struct ToysByIdsRequest {
    pub ids: Vec<String>,
}

/// Create a new toy owned by the authenticated user
pub async fn create_toy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateToyRequest>,
) -> ApiResult<impl IntoResponse> {
    let missing: Vec<&str> = [
        ("name", payload.name.is_empty()),
        ("description", payload.description.is_empty()),
        ("image_url", payload.image_url.is_empty()),
        ("location", payload.location.is_empty()),
        ("latitude", payload.latitude.is_none()),
        ("longitude", payload.longitude.is_none()),
    ]
    .iter()
    .filter_map(|(field, absent)| absent.then_some(*field))
    .collect();

    if !missing.is_empty() {
        return Err(ApiError::InvalidArgument(format!(
            "missing fields: {}",
            missing.join(", ")
        )));
    }

    let (latitude, longitude) = (payload.latitude.unwrap_or(0.0), payload.longitude.unwrap_or(0.0));
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(ApiError::InvalidArgument(
            "coordinates must be numeric".to_string(),
        ));
    }

    // The owner reference has to point at a real account.
    if state.user_repository.find_by_id(user.id).await?.is_none() {
        return Err(ApiError::NotFound("user"));
    }

    let toy = Toy::new(
        payload.name,
        payload.description,
        payload.image_url,
        payload.location,
        longitude,
        latitude,
        user.id,
    );

    state.toy_repository.create(&toy).await?;
    state.lifecycle.on_toy_created(&toy).await?;

    Ok((StatusCode::CREATED, Json(ToyResponse::from(toy))))
}

/// List all toys
pub async fn list_toys(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let toys = state.toy_repository.all().await?;

    Ok(Json(
        toys.into_iter().map(ToyResponse::from).collect::<Vec<_>>(),
    ))
}

/// Toys near a point, nearest first
pub async fn nearby_toys(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<impl IntoResponse> {
    if !query.latitude.is_finite() || !query.longitude.is_finite() {
        return Err(ApiError::InvalidArgument(
            "coordinates must be numeric".to_string(),
        ));
    }

    let max_distance = query.max_distance.unwrap_or(DEFAULT_MAX_DISTANCE_M);
    let toys = state
        .toy_repository
        .nearby(query.longitude, query.latitude, max_distance)
        .await?;

    Ok(Json(
        toys.into_iter().map(ToyResponse::from).collect::<Vec<_>>(),
    ))
}

/// Fetch a batch of toys by their ids
pub async fn toys_by_ids(
    State(state): State<AppState>,
    Json(payload): Json<ToysByIdsRequest>,
) -> ApiResult<impl IntoResponse> {
    let ids = payload
        .ids
        .iter()
        .map(|id| {
            ObjectId::parse_str(id)
                .map_err(|_| ApiError::InvalidArgument(format!("invalid toy id: {id}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let toys = state.toy_repository.by_ids(&ids).await?;

    Ok(Json(
        toys.into_iter().map(ToyResponse::from).collect::<Vec<_>>(),
    ))
}

/// Delete a toy owned by the authenticated user
pub async fn delete_toy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let toy_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::InvalidArgument("invalid toy id".to_string()))?;

    let existing = state
        .toy_repository
        .find_by_id(toy_id)
        .await?
        .ok_or(ApiError::NotFound("toy"))?;

    if existing.owner != user.id {
        return Err(ApiError::Forbidden);
    }

    // The toy may have been deleted since the ownership check.
    let Some(deleted) = state.toy_repository.delete(toy_id).await? else {
        return Err(ApiError::NotFound("toy"));
    };

    state.lifecycle.on_toy_deleted(&deleted).await?;

    Ok(Json(json!({ "message": "Toy deleted successfully" })))
}

//! Authentication routes: registration, password login, Google sign-in

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    models::User,
    password,
    state::AppState,
    validation::{normalize_email, validate_email, validate_password},
};

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request for password login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request for Google sign-in
#[derive(Deserialize)]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

/// Response for successful authentication
#[derive(Serialize)]
pub struct AuthResponse {
    pub user_id: String,
    pub email: String,
    pub favorite_toys: Vec<String>,
    pub token: String,
    pub expires_in: u64,
}

impl AuthResponse {
    fn for_user(state: &AppState, user: User) -> ApiResult<Self> {
        let token = state.jwt.generate_token(user.id, &user.email).map_err(|e| {
            error!("Failed to generate token: {}", e);
            ApiError::Internal
        })?;

        Ok(Self {
            user_id: user.id.to_hex(),
            email: user.email,
            favorite_toys: user.favorite_toys.iter().map(|id| id.to_hex()).collect(),
            token,
            expires_in: state.jwt.token_expiry(),
        })
    }
}

/// Register a new password-based account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email);
    validate_email(&email).map_err(ApiError::InvalidArgument)?;
    validate_password(&payload.password).map_err(ApiError::InvalidArgument)?;

    if state.user_repository.find_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict("user already exists"));
    }

    let password_hash = password::hash(&payload.password).map_err(|e| {
        error!("Failed to hash password: {}", e);
        ApiError::Internal
    })?;

    let user = state.user_repository.create(&email, &password_hash).await?;

    info!("Registered user {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "user_id": user.id.to_hex(),
            "message": "User created successfully",
        })),
    ))
}

/// Password login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let email = normalize_email(&payload.email);
    info!("Login attempt for {}", email);

    let user = state
        .user_repository
        .find_by_email(&email)
        .await?
        .ok_or(ApiError::NotFound("user"))?;

    // Google-only accounts have no password to check against.
    let Some(stored_hash) = user.password_hash.as_deref() else {
        return Err(ApiError::Unauthorized);
    };

    let password_matches = password::verify(stored_hash, &payload.password).map_err(|e| {
        error!("Failed to verify password: {}", e);
        ApiError::Internal
    })?;

    if !password_matches {
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(AuthResponse::for_user(&state, user)?))
}

/// Google sign-in: verify the ID token, then find or create the account
pub async fn google_login(
    State(state): State<AppState>,
    Json(payload): Json<GoogleLoginRequest>,
) -> ApiResult<impl IntoResponse> {
    if payload.id_token.is_empty() {
        return Err(ApiError::InvalidArgument("id_token is required".to_string()));
    }

    let profile = state
        .google
        .verify_id_token(&payload.id_token)
        .await
        .map_err(|e| {
            error!("Google token verification failed: {}", e);
            ApiError::Unauthorized
        })?;

    let email = normalize_email(&profile.email);
    let user = state
        .user_repository
        .upsert_google_user(&email, &profile)
        .await?
        .ok_or(ApiError::Internal)?;

    Ok(Json(AuthResponse::for_user(&state, user)?))
}

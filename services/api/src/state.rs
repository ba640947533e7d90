//! Application state shared across handlers

use crate::{
    favorites::Favorites,
    google::GoogleVerifier,
    jwt::JwtService,
    lifecycle::ListingLifecycle,
    repositories::{ToyRepository, UserRepository},
    storage::ObjectStorage,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: UserRepository,
    pub toy_repository: ToyRepository,
    pub favorites: Favorites<UserRepository>,
    pub lifecycle: ListingLifecycle<UserRepository>,
    pub jwt: JwtService,
    pub google: GoogleVerifier,
    pub storage: ObjectStorage,
}

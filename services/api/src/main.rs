use anyhow::Result;
use aws_config::BehaviorVersion;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod favorites;
mod google;
mod jwt;
mod lifecycle;
mod middleware;
mod models;
mod password;
mod repositories;
mod routes;
mod state;
mod storage;
mod store;
mod validation;

use common::database::{self, MongoConfig};

use crate::{
    favorites::Favorites,
    google::{GoogleConfig, GoogleVerifier},
    jwt::{JwtConfig, JwtService},
    lifecycle::ListingLifecycle,
    repositories::{ToyRepository, UserRepository},
    state::AppState,
    storage::{ObjectStorage, StorageConfig},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting toy-swap API service");

    // Initialize the document store
    let mongo_config = MongoConfig::from_env()?;
    let db = database::init_database(&mongo_config).await?;

    if database::health_check(&db).await? {
        info!("Document store connection successful");
    } else {
        anyhow::bail!("Failed to connect to the document store");
    }

    let user_repository = UserRepository::new(&db);
    let toy_repository = ToyRepository::new(&db);
    user_repository.ensure_indexes().await?;
    toy_repository.ensure_indexes().await?;

    // Initialize the AWS S3 client
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_client = aws_sdk_s3::Client::new(&aws_config);
    let storage = ObjectStorage::new(s3_client, StorageConfig::from_env()?);

    let jwt = JwtService::new(&JwtConfig::from_env()?);
    let google = GoogleVerifier::new(GoogleConfig::from_env()?);

    let app_state = AppState {
        favorites: Favorites::new(user_repository.clone()),
        lifecycle: ListingLifecycle::new(user_repository.clone()),
        user_repository,
        toy_repository,
        jwt,
        google,
        storage,
    };

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    info!("API service listening on 0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

//! Database module for handling MongoDB connections and operations
//!
//! This module provides client configuration, initialization, and health
//! checks for the MongoDB document store.

use crate::error::{StoreError, StoreResult};
use mongodb::{Client, Database, bson::doc};
use std::env;
use tracing::info;

/// Document-store configuration struct
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// MongoDB connection URI
    pub uri: String,
    /// Database name
    pub database: String,
}

impl MongoConfig {
    /// Create a new MongoConfig from environment variables
    ///
    /// # Environment Variables
    /// - `MONGODB_URI`: MongoDB connection URI (default: `mongodb://localhost:27017`)
    /// - `MONGODB_DATABASE`: database name (default: `toyswap`)
    pub fn from_env() -> StoreResult<Self> {
        let uri =
            env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let database = env::var("MONGODB_DATABASE").unwrap_or_else(|_| "toyswap".to_string());

        if database.is_empty() {
            return Err(StoreError::Configuration(
                "MONGODB_DATABASE must not be empty".to_string(),
            ));
        }

        Ok(Self { uri, database })
    }
}

/// Initialize a MongoDB client and return a handle to the configured database
pub async fn init_database(config: &MongoConfig) -> StoreResult<Database> {
    info!("Connecting to MongoDB");

    let client = Client::with_uri_str(&config.uri)
        .await
        .map_err(StoreError::Connection)?;

    Ok(client.database(&config.database))
}

/// Check store connectivity with a `ping` command
pub async fn health_check(db: &Database) -> StoreResult<bool> {
    db.run_command(doc! { "ping": 1 }).await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_mongo_config_defaults() {
        unsafe {
            std::env::remove_var("MONGODB_URI");
            std::env::remove_var("MONGODB_DATABASE");
        }

        let config = MongoConfig::from_env().unwrap();
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "toyswap");
    }

    #[test]
    #[serial]
    fn test_mongo_config_from_env_with_custom_values() {
        unsafe {
            std::env::set_var("MONGODB_URI", "mongodb://db.internal:27017");
            std::env::set_var("MONGODB_DATABASE", "toyswap_test");
        }

        let config = MongoConfig::from_env().unwrap();
        assert_eq!(config.uri, "mongodb://db.internal:27017");
        assert_eq!(config.database, "toyswap_test");

        unsafe {
            std::env::remove_var("MONGODB_URI");
            std::env::remove_var("MONGODB_DATABASE");
        }
    }
}

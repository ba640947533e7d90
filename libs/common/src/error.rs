//! Custom error types for the common library
//!
//! This module defines the store-level error type shared by everything that
//! talks to MongoDB.

use mongodb::error::Error as MongoError;
use thiserror::Error;

/// Custom error type for document-store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while connecting to the store
    #[error("store connection error: {0}")]
    Connection(#[source] MongoError),

    /// Error occurred while executing a store operation
    #[error("store operation error: {0}")]
    Operation(#[from] MongoError),

    /// Error converting a domain value into a BSON document
    #[error("store serialization error: {0}")]
    Serialization(#[from] mongodb::bson::ser::Error),

    /// Configuration error
    #[error("store configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

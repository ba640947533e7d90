//! Toy listing model

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// GeoJSON point; coordinates are `[longitude, latitude]`, longitude first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Toy document as stored in the `toys` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toy {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    /// Free-text location label shown to users.
    pub location: String,
    /// Indexed with 2dsphere for the proximity query.
    pub coordinates: GeoPoint,
    pub owner: ObjectId,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Toy {
    /// Create a new toy listing owned by `owner`
    pub fn new(
        name: String,
        description: String,
        image_url: String,
        location: String,
        longitude: f64,
        latitude: f64,
        owner: ObjectId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            name,
            description,
            image_url,
            location,
            coordinates: GeoPoint::new(longitude, latitude),
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Toy listing as exposed by the API
#[derive(Debug, Serialize)]
pub struct ToyResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub location: String,
    pub longitude: f64,
    pub latitude: f64,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Toy> for ToyResponse {
    fn from(toy: Toy) -> Self {
        Self {
            id: toy.id.to_hex(),
            longitude: toy.coordinates.longitude(),
            latitude: toy.coordinates.latitude(),
            name: toy.name,
            description: toy.description,
            image_url: toy.image_url,
            location: toy.location,
            owner: toy.owner.to_hex(),
            created_at: toy.created_at,
            updated_at: toy.updated_at,
        }
    }
}

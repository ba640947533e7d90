//! Toy repository for document-store operations

use common::error::StoreResult;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{doc, oid::ObjectId},
};
use tracing::info;

use crate::models::Toy;

/// Toy repository
#[derive(Clone)]
pub struct ToyRepository {
    collection: Collection<Toy>,
}

impl ToyRepository {
    /// Create a new toy repository
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("toys"),
        }
    }

    /// Create the geospatial index backing the proximity query
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "coordinates": "2dsphere" })
                    .build(),
            )
            .await?;

        Ok(())
    }

    /// Insert a new toy
    pub async fn create(&self, toy: &Toy) -> StoreResult<()> {
        info!("Creating toy {} for owner {}", toy.id, toy.owner);

        self.collection.insert_one(toy).await?;

        Ok(())
    }

    /// Find a toy by ID
    pub async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<Toy>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// All toys
    pub async fn all(&self) -> StoreResult<Vec<Toy>> {
        let cursor = self.collection.find(doc! {}).await?;

        Ok(cursor.try_collect().await?)
    }

    /// Toys within `max_distance_m` meters of the given point, nearest first
    pub async fn nearby(
        &self,
        longitude: f64,
        latitude: f64,
        max_distance_m: i64,
    ) -> StoreResult<Vec<Toy>> {
        let filter = doc! {
            "coordinates": {
                "$near": {
                    "$geometry": { "type": "Point", "coordinates": [longitude, latitude] },
                    "$maxDistance": max_distance_m,
                }
            }
        };

        let cursor = self.collection.find(filter).await?;

        Ok(cursor.try_collect().await?)
    }

    /// Fetch the toys whose ids appear in `ids`
    pub async fn by_ids(&self, ids: &[ObjectId]) -> StoreResult<Vec<Toy>> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Remove a toy and return the deleted document
    pub async fn delete(&self, id: ObjectId) -> StoreResult<Option<Toy>> {
        Ok(self.collection.find_one_and_delete(doc! { "_id": id }).await?)
    }
}

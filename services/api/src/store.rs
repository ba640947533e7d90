//! Store capabilities backing the favorites and listing-count logic
//!
//! Every operation here is element-scoped: it touches one array element or
//! one counter inside a single user document. Concurrent requests against
//! the same user therefore never overwrite each other's changes, which a
//! read-modify-write of the whole favorites array would.

use async_trait::async_trait;
use common::error::StoreResult;
use mongodb::bson::oid::ObjectId;

/// Atomic per-document operations on user favorite sets and listing counts
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Add `toy_id` to the user's favorite set unless it is already present.
    /// Returns false when no such user exists.
    async fn push_favorite(&self, user_id: ObjectId, toy_id: ObjectId) -> StoreResult<bool>;

    /// Remove `toy_id` from the user's favorite set. Returns true when the
    /// set contained it.
    async fn pull_favorite(&self, user_id: ObjectId, toy_id: ObjectId) -> StoreResult<bool>;

    /// Remove `toy_id` from every favorite set containing it and return the
    /// number of users touched. Removing an id nobody holds is a no-op.
    async fn pull_favorite_from_all(&self, toy_id: ObjectId) -> StoreResult<u64>;

    /// Current favorite set in insertion order, or `None` when the user
    /// does not exist.
    async fn favorites_of(&self, user_id: ObjectId) -> StoreResult<Option<Vec<ObjectId>>>;

    /// Add `delta` to the user's listing count, clamped so the count never
    /// drops below zero. Returns false when no such user exists.
    async fn bump_listing_count(&self, user_id: ObjectId, delta: i64) -> StoreResult<bool>;
}

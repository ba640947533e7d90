//! Cross-entity consistency for toy creation and deletion
//!
//! Toys and users live in separate collections with no foreign keys. This
//! keeps the owner's listing count and everyone's favorite sets in line with
//! which toys actually exist.

use tracing::{debug, error, warn};

use crate::{error::ApiError, models::Toy, store::UserStore};

/// Maintains listing counts and favorite sets across toy create/delete
#[derive(Clone)]
pub struct ListingLifecycle<S> {
    store: S,
}

impl<S: UserStore> ListingLifecycle<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Called after a toy has been inserted: bump the owner's listing count.
    ///
    /// The toy is already committed at this point, so a vanished owner is
    /// recorded as an inconsistency instead of failing the request.
    pub async fn on_toy_created(&self, toy: &Toy) -> Result<(), ApiError> {
        if !self.store.bump_listing_count(toy.owner, 1).await? {
            warn!(owner = %toy.owner, toy = %toy.id, "owner missing during listing-count increment, toy is orphaned");
        }

        Ok(())
    }

    /// Called after a toy has been removed from its collection.
    ///
    /// Decrements the former owner's listing count (never below zero) and
    /// strips the toy id out of every favorite set, so no user is left
    /// pointing at a toy that no longer exists. The decrement is best
    /// effort; the favorites cleanup is idempotent, so a failed call can be
    /// retried as-is.
    pub async fn on_toy_deleted(&self, toy: &Toy) -> Result<(), ApiError> {
        match self.store.bump_listing_count(toy.owner, -1).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(owner = %toy.owner, toy = %toy.id, "owner missing during listing-count decrement")
            }
            Err(e) => {
                error!(owner = %toy.owner, toy = %toy.id, "listing-count decrement failed: {e}")
            }
        }

        let cleaned = self.store.pull_favorite_from_all(toy.id).await?;
        debug!(toy = %toy.id, users = cleaned, "removed deleted toy from favorite sets");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::Favorites;
    use crate::store::{UserStore, memory::MemoryStore};
    use mongodb::bson::oid::ObjectId;

    fn toy_owned_by(owner: ObjectId) -> Toy {
        Toy::new(
            "Wooden train".to_string(),
            "Solid beech, barely used".to_string(),
            "https://img.example/train.jpg".to_string(),
            "Lyon".to_string(),
            4.8357,
            45.764,
            owner,
        )
    }

    #[tokio::test]
    async fn test_create_increments_owner_count() {
        let store = MemoryStore::default();
        let lifecycle = ListingLifecycle::new(store.clone());
        let owner = store.add_user();

        lifecycle.on_toy_created(&toy_owned_by(owner)).await.unwrap();
        assert_eq!(store.listing_count(owner), 1);
    }

    #[tokio::test]
    async fn test_create_with_missing_owner_is_absorbed() {
        let store = MemoryStore::default();
        let lifecycle = ListingLifecycle::new(store);

        // Owner was never registered: the increment touches nobody, but the
        // call still succeeds.
        lifecycle
            .on_toy_created(&toy_owned_by(ObjectId::new()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_decrements_and_floors_at_zero() {
        let store = MemoryStore::default();
        let lifecycle = ListingLifecycle::new(store.clone());
        let owner = store.add_user();
        let toy = toy_owned_by(owner);

        lifecycle.on_toy_created(&toy).await.unwrap();
        lifecycle.on_toy_deleted(&toy).await.unwrap();
        assert_eq!(store.listing_count(owner), 0);

        // Replaying the delete must not push the count negative.
        lifecycle.on_toy_deleted(&toy).await.unwrap();
        assert_eq!(store.listing_count(owner), 0);
    }

    #[tokio::test]
    async fn test_delete_with_missing_owner_is_absorbed() {
        let store = MemoryStore::default();
        let lifecycle = ListingLifecycle::new(store);

        lifecycle
            .on_toy_deleted(&toy_owned_by(ObjectId::new()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_cleans_up_every_favorite_set() {
        let store = MemoryStore::default();
        let lifecycle = ListingLifecycle::new(store.clone());
        let favorites = Favorites::new(store.clone());

        let owner = store.add_user();
        let toy = toy_owned_by(owner);
        let other = ObjectId::new();

        let u1 = store.add_user();
        let u2 = store.add_user();
        let u3 = store.add_user();

        favorites.toggle(u1, &toy.id.to_hex()).await.unwrap();
        favorites.toggle(u3, &toy.id.to_hex()).await.unwrap();
        favorites.toggle(u2, &other.to_hex()).await.unwrap();

        lifecycle.on_toy_deleted(&toy).await.unwrap();

        assert!(store.favorites_of(u1).await.unwrap().unwrap().is_empty());
        assert_eq!(store.favorites_of(u2).await.unwrap().unwrap(), vec![other]);
        assert!(store.favorites_of(u3).await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_is_idempotent() {
        let store = MemoryStore::default();
        let lifecycle = ListingLifecycle::new(store.clone());
        let favorites = Favorites::new(store.clone());

        let owner = store.add_user();
        let toy = toy_owned_by(owner);
        let keeper = ObjectId::new();

        let user = store.add_user();
        favorites.toggle(user, &toy.id.to_hex()).await.unwrap();
        favorites.toggle(user, &keeper.to_hex()).await.unwrap();

        assert_eq!(store.pull_favorite_from_all(toy.id).await.unwrap(), 1);
        // Second pass finds nothing left to remove and changes nothing.
        assert_eq!(store.pull_favorite_from_all(toy.id).await.unwrap(), 0);
        assert_eq!(
            store.favorites_of(user).await.unwrap().unwrap(),
            vec![keeper]
        );
    }

    #[tokio::test]
    async fn test_listing_and_favorites_end_to_end() {
        let store = MemoryStore::default();
        let lifecycle = ListingLifecycle::new(store.clone());
        let favorites = Favorites::new(store.clone());

        let seller = store.add_user();
        let buyer = store.add_user();
        assert_eq!(store.listing_count(seller), 0);

        let toy = toy_owned_by(seller);
        lifecycle.on_toy_created(&toy).await.unwrap();
        assert_eq!(store.listing_count(seller), 1);

        let hex = toy.id.to_hex();
        assert_eq!(
            favorites.toggle(buyer, &hex).await.unwrap(),
            vec![hex.clone()]
        );
        assert!(favorites.toggle(buyer, &hex).await.unwrap().is_empty());

        lifecycle.on_toy_deleted(&toy).await.unwrap();
        assert_eq!(store.listing_count(seller), 0);

        // The deleted id can still be favorited; it is stored as-is.
        assert_eq!(favorites.toggle(buyer, &hex).await.unwrap(), vec![hex]);
    }
}

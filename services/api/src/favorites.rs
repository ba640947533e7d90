//! Favorite-set toggling
//!
//! A favorite set is mutated one element at a time, never by rewriting the
//! whole array, so two requests toggling different toys for the same user
//! both land.

use mongodb::bson::oid::ObjectId;
use tracing::debug;

use crate::{error::ApiError, store::UserStore};

/// Toggles membership of toy ids in user favorite sets
#[derive(Clone)]
pub struct Favorites<S> {
    store: S,
}

impl<S: UserStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Flip `toy_id` in the user's favorite set and return the updated set
    /// as hex ids, in insertion order.
    ///
    /// The toy itself does not have to exist: favoriting an unknown or
    /// already-deleted id is accepted and stores the id as-is. Only the id
    /// format is checked.
    pub async fn toggle(&self, user_id: ObjectId, toy_id: &str) -> Result<Vec<String>, ApiError> {
        let toy_id = ObjectId::parse_str(toy_id)
            .map_err(|_| ApiError::InvalidArgument("invalid toy id".to_string()))?;

        let removed = self.store.pull_favorite(user_id, toy_id).await?;
        if removed {
            debug!(%user_id, %toy_id, "favorite removed");
        } else {
            if !self.store.push_favorite(user_id, toy_id).await? {
                return Err(ApiError::NotFound("user"));
            }
            debug!(%user_id, %toy_id, "favorite added");
        }

        let favorites = self
            .store
            .favorites_of(user_id)
            .await?
            .ok_or(ApiError::NotFound("user"))?;

        Ok(favorites.iter().map(|id| id.to_hex()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let store = MemoryStore::default();
        let favorites = Favorites::new(store.clone());
        let user = store.add_user();
        let toy = ObjectId::new();

        let after_add = favorites.toggle(user, &toy.to_hex()).await.unwrap();
        assert_eq!(after_add, vec![toy.to_hex()]);

        let after_remove = favorites.toggle(user, &toy.to_hex()).await.unwrap();
        assert!(after_remove.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_toggles_never_duplicate() {
        let store = MemoryStore::default();
        let favorites = Favorites::new(store.clone());
        let user = store.add_user();
        let toy = ObjectId::new();

        for _ in 0..5 {
            let current = favorites.toggle(user, &toy.to_hex()).await.unwrap();
            let occurrences = current.iter().filter(|id| **id == toy.to_hex()).count();
            assert!(occurrences <= 1);
        }
    }

    #[tokio::test]
    async fn test_preserves_insertion_order() {
        let store = MemoryStore::default();
        let favorites = Favorites::new(store.clone());
        let user = store.add_user();
        let (a, b, c) = (ObjectId::new(), ObjectId::new(), ObjectId::new());

        favorites.toggle(user, &a.to_hex()).await.unwrap();
        favorites.toggle(user, &b.to_hex()).await.unwrap();
        favorites.toggle(user, &c.to_hex()).await.unwrap();

        let after = favorites.toggle(user, &b.to_hex()).await.unwrap();
        assert_eq!(after, vec![a.to_hex(), c.to_hex()]);
    }

    #[tokio::test]
    async fn test_invalid_id_rejected() {
        let store = MemoryStore::default();
        let favorites = Favorites::new(store.clone());
        let user = store.add_user();

        let err = favorites.toggle(user, "not-an-object-id").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let store = MemoryStore::default();
        let favorites = Favorites::new(store);

        let err = favorites
            .toggle(ObjectId::new(), &ObjectId::new().to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_toggles_keep_both_changes() {
        let store = MemoryStore::default();
        let favorites = Favorites::new(store.clone());
        let user = store.add_user();
        let (a, b) = (ObjectId::new(), ObjectId::new());

        let (a_hex, b_hex) = (a.to_hex(), b.to_hex());
        let (first, second) = tokio::join!(
            favorites.toggle(user, &a_hex),
            favorites.toggle(user, &b_hex),
        );
        first.unwrap();
        second.unwrap();

        let current = store.favorites_of(user).await.unwrap().unwrap();
        assert!(current.contains(&a));
        assert!(current.contains(&b));
    }
}

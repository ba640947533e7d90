//! User repository for document-store operations

use async_trait::async_trait;
use common::error::StoreResult;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId, to_document},
    options::{IndexOptions, ReturnDocument},
};
use tracing::info;

use crate::google::GoogleProfile;
use crate::models::{UpdateProfile, User};
use crate::store::UserStore;

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    /// Create the unique email index and the sparse unique google_id index
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        self.collection
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "google_id": 1 })
                    .options(IndexOptions::builder().unique(true).sparse(true).build())
                    .build(),
            )
            .await?;

        Ok(())
    }

    /// Create a new password-based user; the password arrives pre-hashed
    pub async fn create(&self, email: &str, password_hash: &str) -> StoreResult<User> {
        info!("Creating new user: {}", email);

        let user = User::with_password(email.to_string(), password_hash.to_string());
        self.collection.insert_one(&user).await?;

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: ObjectId) -> StoreResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    /// Find the user behind a verified Google identity, creating the account
    /// on first sign-in. A user that already registered with this email is
    /// reused rather than duplicated.
    pub async fn upsert_google_user(
        &self,
        email: &str,
        profile: &GoogleProfile,
    ) -> StoreResult<Option<User>> {
        info!("Finding or creating Google user: {}", email);

        let new_user = User::from_google(
            email.to_string(),
            profile.sub.clone(),
            profile.name.clone(),
            profile.picture.clone(),
        );
        let insert = to_document(&new_user)?;

        let user = self
            .collection
            .find_one_and_update(doc! { "email": email }, doc! { "$setOnInsert": insert })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(user)
    }

    /// Apply a partial profile update and return the updated user
    pub async fn update_profile(
        &self,
        id: ObjectId,
        update: &UpdateProfile,
    ) -> StoreResult<Option<User>> {
        let mut set = Document::new();
        if let Some(name) = &update.name {
            set.insert("name", name.as_str());
        }
        if let Some(profile_image) = &update.profile_image {
            set.insert("profile_image", profile_image.as_str());
        }
        set.insert("updated_at", mongodb::bson::DateTime::now());

        let user = self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn push_favorite(&self, user_id: ObjectId, toy_id: ObjectId) -> StoreResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": user_id },
                doc! { "$addToSet": { "favorite_toys": toy_id } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn pull_favorite(&self, user_id: ObjectId, toy_id: ObjectId) -> StoreResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": user_id, "favorite_toys": toy_id },
                doc! { "$pull": { "favorite_toys": toy_id } },
            )
            .await?;

        Ok(result.modified_count > 0)
    }

    async fn pull_favorite_from_all(&self, toy_id: ObjectId) -> StoreResult<u64> {
        let result = self
            .collection
            .update_many(
                doc! { "favorite_toys": toy_id },
                doc! { "$pull": { "favorite_toys": toy_id } },
            )
            .await?;

        Ok(result.modified_count)
    }

    async fn favorites_of(&self, user_id: ObjectId) -> StoreResult<Option<Vec<ObjectId>>> {
        let user = self.collection.find_one(doc! { "_id": user_id }).await?;

        Ok(user.map(|user| user.favorite_toys))
    }

    async fn bump_listing_count(&self, user_id: ObjectId, delta: i64) -> StoreResult<bool> {
        // Pipeline update so the zero clamp happens in the same atomic step
        // as the addition.
        let update = vec![doc! {
            "$set": {
                "total_listings": {
                    "$max": [0_i64, { "$add": [{ "$ifNull": ["$total_listings", 0_i64] }, delta] }]
                }
            }
        }];

        let result = self
            .collection
            .update_one(doc! { "_id": user_id }, update)
            .await?;

        Ok(result.matched_count > 0)
    }
}

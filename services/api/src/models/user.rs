//! User model and related functionality

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// User document as stored in the `users` collection
///
/// Emails are stored trimmed and lowercased; `favorite_toys` holds toy ids
/// in insertion order and never contains a duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    /// Absent for accounts created through Google sign-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Google subject id; unique among users that have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub favorite_toys: Vec<ObjectId>,
    /// Average review rating; stays `None` until the first review arrives.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews_count: i32,
    /// Number of active listings owned by this user. Never negative.
    #[serde(default)]
    pub total_listings: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new password-based account
    pub fn with_password(email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            email,
            password_hash: Some(password_hash),
            google_id: None,
            name: None,
            profile_image: None,
            favorite_toys: Vec::new(),
            rating: None,
            reviews_count: 0,
            total_listings: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a new account arriving through Google sign-in
    pub fn from_google(
        email: String,
        google_id: String,
        name: Option<String>,
        profile_image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            email,
            password_hash: None,
            google_id: Some(google_id),
            name,
            profile_image,
            favorite_toys: Vec::new(),
            rating: None,
            reviews_count: 0,
            total_listings: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Profile update payload
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub profile_image: Option<String>,
}

/// User profile as exposed by the API; never carries credentials
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub favorite_toys: Vec<String>,
    pub rating: Option<f64>,
    pub reviews_count: i32,
    pub total_listings: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            name: user.name,
            profile_image: user.profile_image,
            favorite_toys: user.favorite_toys.iter().map(|id| id.to_hex()).collect(),
            rating: user.rating,
            reviews_count: user.reviews_count,
            total_listings: user.total_listings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_never_exposes_credentials() {
        let user = User::with_password("a@x.com".to_string(), "$argon2id$stub".to_string());
        let response = UserResponse::from(user);

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("password_hash").is_none());
        assert!(value.get("google_id").is_none());
        assert_eq!(value["email"], "a@x.com");
    }

    #[test]
    fn test_new_accounts_start_with_empty_counters() {
        let user = User::from_google(
            "a@x.com".to_string(),
            "110169484474386276334".to_string(),
            Some("Ada".to_string()),
            None,
        );

        assert!(user.password_hash.is_none());
        assert!(user.favorite_toys.is_empty());
        assert_eq!(user.rating, None);
        assert_eq!(user.reviews_count, 0);
        assert_eq!(user.total_listings, 0);
    }
}

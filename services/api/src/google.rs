//! Google identity verification
//!
//! Verifies Google-issued ID tokens through the `tokeninfo` endpoint and
//! checks the audience against the configured OAuth client id.

use anyhow::Result;
use serde::Deserialize;
use tracing::info;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Google verifier configuration
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// OAuth client id the tokens must be issued for
    pub client_id: String,
}

impl GoogleConfig {
    /// Create a new GoogleConfig from environment variables
    ///
    /// # Environment Variables
    /// - `GOOGLE_CLIENT_ID`: OAuth client id
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("GOOGLE_CLIENT_ID")
            .map_err(|_| anyhow::anyhow!("GOOGLE_CLIENT_ID environment variable not set"))?;

        Ok(GoogleConfig { client_id })
    }
}

/// Verified profile carried by a Google ID token
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    /// Audience the token was issued for
    pub aud: String,
    /// Google subject id
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Profile image URL
    #[serde(default)]
    pub picture: Option<String>,
}

/// Verifies Google ID tokens
#[derive(Clone)]
pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: String,
}

impl GoogleVerifier {
    /// Create a new verifier
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.client_id,
        }
    }

    /// Verify an ID token and return the profile it carries
    ///
    /// Google rejects expired or malformed tokens with a non-success
    /// status; the audience check is ours.
    pub async fn verify_id_token(&self, id_token: &str) -> Result<GoogleProfile> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Google rejected the id token: {}",
                response.status()
            ));
        }

        let profile: GoogleProfile = response.json().await?;
        check_audience(&profile, &self.client_id)?;

        info!("Verified Google identity for {}", profile.email);
        Ok(profile)
    }
}

/// Reject tokens issued for another OAuth client
fn check_audience(profile: &GoogleProfile, client_id: &str) -> Result<()> {
    if profile.aud != client_id {
        return Err(anyhow::anyhow!("id token audience mismatch"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialization() {
        // tokeninfo returns every claim as a string; unknown fields are
        // skipped.
        let payload = r#"{
            "aud": "client-123.apps.googleusercontent.com",
            "sub": "110169484474386276334",
            "email": "a@x.com",
            "email_verified": "true",
            "name": "Ada",
            "picture": "https://lh3.googleusercontent.com/a/photo.jpg",
            "exp": "1699999999"
        }"#;

        let profile: GoogleProfile = serde_json::from_str(payload).unwrap();
        assert_eq!(profile.sub, "110169484474386276334");
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_audience_checked() {
        let profile = GoogleProfile {
            aud: "client-123".to_string(),
            sub: "1".to_string(),
            email: "a@x.com".to_string(),
            name: None,
            picture: None,
        };

        assert!(check_audience(&profile, "client-123").is_ok());
        assert!(check_audience(&profile, "someone-else").is_err());
    }
}

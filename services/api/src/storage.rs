//! Object storage for listing images

use anyhow::Result;
use aws_sdk_s3::{Client, primitives::ByteStream};
use tracing::info;
use uuid::Uuid;

/// Object-storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket holding listing images
    pub bucket: String,
    /// AWS region, used to build public object URLs
    pub region: String,
}

impl StorageConfig {
    /// Create a new StorageConfig from environment variables
    ///
    /// # Environment Variables
    /// - `AWS_BUCKET_NAME`: bucket for uploaded images
    /// - `AWS_REGION`: bucket region (default: eu-west-3)
    pub fn from_env() -> Result<Self> {
        let bucket = std::env::var("AWS_BUCKET_NAME")
            .map_err(|_| anyhow::anyhow!("AWS_BUCKET_NAME environment variable not set"))?;

        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-3".to_string());

        Ok(StorageConfig { bucket, region })
    }
}

/// Uploads listing images to S3 and hands back their public URLs
#[derive(Clone)]
pub struct ObjectStorage {
    client: Client,
    bucket: String,
    region: String,
}

impl ObjectStorage {
    /// Create a new object storage handle
    pub fn new(client: Client, config: StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket,
            region: config.region,
        }
    }

    /// Store an image and return its public URL
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        content_type: &str,
        original_name: &str,
    ) -> Result<String> {
        let key = object_key(original_name);
        info!("Uploading image to S3: {}", key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await?;

        Ok(self.public_url(&key))
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, key
        )
    }
}

/// Unique object key under `toys/`, keeping the original file extension
fn object_key(original_name: &str) -> String {
    let suffix = Uuid::new_v4().simple();
    match original_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => format!("toys/{}.{}", suffix, ext),
        _ => format!("toys/{}", suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::BehaviorVersion;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_from_env() {
        unsafe {
            std::env::set_var("AWS_BUCKET_NAME", "toy-images");
            std::env::remove_var("AWS_REGION");
        }

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.bucket, "toy-images");
        assert_eq!(config.region, "eu-west-3");

        unsafe {
            std::env::remove_var("AWS_BUCKET_NAME");
        }
    }

    #[test]
    fn test_object_key_keeps_extension() {
        let key = object_key("old photo.JPG");
        assert!(key.starts_with("toys/"));
        assert!(key.ends_with(".JPG"));
    }

    #[test]
    fn test_object_key_without_extension() {
        let key = object_key("photo");
        assert!(key.starts_with("toys/"));
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_object_keys_are_unique() {
        assert_ne!(object_key("a.png"), object_key("a.png"));
    }

    #[test]
    fn test_public_url_format() {
        let client = Client::from_conf(
            aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .build(),
        );
        let storage = ObjectStorage::new(
            client,
            StorageConfig {
                bucket: "toy-images".to_string(),
                region: "eu-west-3".to_string(),
            },
        );

        assert_eq!(
            storage.public_url("toys/abc.png"),
            "https://toy-images.s3.eu-west-3.amazonaws.com/toys/abc.png"
        );
    }
}

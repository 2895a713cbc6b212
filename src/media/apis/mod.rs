pub mod replicate;
pub mod supabase;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{app::models::api_error::ApiError, media::models::file_properties::FileProperties};

/// Hosted image-to-image model.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Runs the model on `image_url` and returns the output locators in the
    /// order the service reported them.
    async fn generate(&self, image_url: &str) -> Result<Vec<String>, ApiError>;
}

#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, ApiError>;
}

/// Object store with a single public bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Succeeds only when the store acknowledged the object.
    async fn upload(&self, file_properties: &FileProperties) -> Result<(), ApiError>;

    fn public_url(&self, file_name: &str) -> Result<String, ApiError>;
}

use async_trait::async_trait;
use reqwest::{header, StatusCode};

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError},
    media::{apis::ObjectStorage, models::file_properties::FileProperties},
};

use super::structs::{
    supabase_error_response::SupabaseErrorResponse,
    supabase_upload_response::SupabaseUploadResponse,
};

/// Supabase Storage bucket addressed by its project URL.
#[derive(Debug, Clone)]
pub struct SupabaseStorage {
    client: reqwest::Client,
    url: Option<String>,
    key: Option<String>,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(
        client: reqwest::Client,
        url: Option<String>,
        key: Option<String>,
        bucket: String,
    ) -> Self {
        Self {
            client,
            url: url.map(|u| u.trim_end_matches('/').to_string()),
            key,
            bucket,
        }
    }

    fn base_url(&self) -> Result<&str, ApiError> {
        match &self.url {
            Some(url) => Ok(url.as_str()),
            None => Err(not_configured("SUPABASE_URL")),
        }
    }

    fn key(&self) -> Result<&str, ApiError> {
        match &self.key {
            Some(key) => Ok(key.as_str()),
            None => Err(not_configured("SUPABASE_KEY")),
        }
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload(&self, file_properties: &FileProperties) -> Result<(), ApiError> {
        let base_url = self.base_url()?;
        let key = self.key()?;

        let url = format!(
            "{}/storage/v1/object/{}/{}",
            base_url, self.bucket, file_properties.file_name
        );
        let result = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", key))
            .header("apikey", key)
            .header(header::CONTENT_TYPE, file_properties.mime_type.to_string())
            .header("x-upsert", "true")
            .body(file_properties.data.clone())
            .send()
            .await;

        let res = match result {
            Ok(res) => res,
            Err(e) => {
                tracing::error!(%e);
                return Err(DefaultApiError::InternalServerError.value());
            }
        };

        let status = res.status();
        let text = match res.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(%e);
                return Err(DefaultApiError::InternalServerError.value());
            }
        };

        if !status.is_success() {
            match serde_json::from_str::<SupabaseErrorResponse>(&text) {
                Ok(error_res) => tracing::error!(?error_res, %status, "supabase upload rejected"),
                Err(_) => tracing::error!(%text, %status, "supabase upload rejected"),
            }
            return Err(ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Storage returned status {}.", status),
            });
        }

        // A 2xx without an object key is not an acknowledged upload.
        match serde_json::from_str::<SupabaseUploadResponse>(&text) {
            Ok(upload_res) => {
                tracing::debug!(key = %upload_res.key, id = ?upload_res.id, "uploaded object");
                Ok(())
            }
            Err(_) => {
                tracing::error!(%text, "supabase upload response has no object key");
                Err(ApiError {
                    code: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Storage did not acknowledge the upload.".to_string(),
                })
            }
        }
    }

    fn public_url(&self, file_name: &str) -> Result<String, ApiError> {
        Ok(format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url()?,
            self.bucket,
            file_name
        ))
    }
}

fn not_configured(name: &str) -> ApiError {
    tracing::error!("{} is not configured", name);
    ApiError {
        code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Storage is not configured.".to_string(),
    }
}

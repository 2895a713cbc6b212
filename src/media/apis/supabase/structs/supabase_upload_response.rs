use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SupabaseUploadResponse {
    #[serde(rename(deserialize = "Key"))]
    pub key: String,
    #[serde(rename(deserialize = "Id"))]
    pub id: Option<String>,
}

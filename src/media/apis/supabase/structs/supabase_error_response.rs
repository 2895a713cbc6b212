use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct SupabaseErrorResponse {
    #[serde(rename(deserialize = "statusCode"))]
    pub status_code: Option<Value>,
    pub error: Option<String>,
    pub message: Option<String>,
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProcessImageDto {
    #[serde(default, deserialize_with = "string_or_none")]
    #[validate(
        required(message = "image_url is required."),
        length(min = 1, message = "image_url must not be empty.")
    )]
    pub image_url: Option<String>,
}

impl ProcessImageDto {
    pub fn sanitized(&self) -> Self {
        Self {
            image_url: self.image_url.as_ref().map(|url| url.trim().to_string()),
        }
    }
}

// Anything other than a JSON string counts as no URL at all.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(url)) => Ok(Some(url)),
        _ => Ok(None),
    }
}

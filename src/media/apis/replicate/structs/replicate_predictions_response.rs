use serde::Deserialize;
use serde_json::Value;

use crate::media::apis::replicate::enums::replicate_prediction_status::ReplicatePredictionStatus;

#[derive(Debug, Deserialize)]
pub struct ReplicatePredictionsResponse {
    pub id: String,
    pub version: Option<String>,
    pub status: ReplicatePredictionStatus,
    pub output: Option<Value>,
    pub error: Option<Value>,
    pub logs: Option<String>,
}

impl ReplicatePredictionsResponse {
    /// Output locators in service order. Models report either a list of URLs
    /// or a single URL.
    pub fn output_urls(&self) -> Vec<String> {
        match &self.output {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::to_string)
                .collect(),
            Some(Value::String(url)) => vec![url.to_string()],
            _ => Vec::new(),
        }
    }

    pub fn error_message(&self) -> String {
        match &self.error {
            Some(Value::String(message)) => message.to_string(),
            Some(other) => other.to_string(),
            None => format!("Prediction {} ended as {:?}.", self.id, self.status),
        }
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    StatusCode,
};
use tokio::time::sleep;

use crate::{
    app::{errors::DefaultApiError, models::api_error::ApiError},
    media::apis::ImageGenerator,
};

use super::{
    config::{API_URL, POLL_INTERVAL},
    enums::{
        replicate_model_version::{ReplicateModel, ReplicateModelVersion},
        replicate_prediction_status::ReplicatePredictionStatus,
    },
    models::{input_spec::InputSpec, input_spec_mirage_ghibli::InputSpecMirageGhibli},
    structs::replicate_predictions_response::ReplicatePredictionsResponse,
};

/// Runs the pinned Ghibli style model through the Replicate predictions API.
#[derive(Debug, Clone)]
pub struct ReplicateClient {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
    poll_interval: Duration,
}

impl ReplicateClient {
    pub fn new(
        client: reqwest::Client,
        api_url: Option<String>,
        api_token: Option<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url
                .unwrap_or(API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_token,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let Some(api_token) = &self.api_token else {
            tracing::error!("REPLICATE_API_TOKEN is not configured");
            return Err(ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Replicate API token is not configured.".to_string(),
            });
        };

        let authorization = HeaderValue::from_str(&format!("Token {}", api_token)).map_err(|e| {
            tracing::error!(%e);
            DefaultApiError::InternalServerError.value()
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(header::AUTHORIZATION, authorization);
        Ok(headers)
    }

    async fn create_prediction(
        &self,
        input_spec: &InputSpec,
    ) -> Result<ReplicatePredictionsResponse, ApiError> {
        let mut headers = self.headers()?;
        headers.insert("prefer", HeaderValue::from_static("wait"));

        let url = format!("{}/predictions", self.api_url);
        let result = self
            .client
            .post(url)
            .headers(headers)
            .json(input_spec)
            .send()
            .await;

        parse_prediction("create_prediction", result).await
    }

    async fn get_prediction_by_id(
        &self,
        id: &str,
    ) -> Result<ReplicatePredictionsResponse, ApiError> {
        let headers = self.headers()?;

        let url = format!("{}/predictions/{}", self.api_url, id);
        let result = self.client.get(url).headers(headers).send().await;

        parse_prediction("get_prediction_by_id", result).await
    }

    /// Polls until the prediction leaves the pending states. Replicate expires
    /// stale predictions itself, so there is no local deadline.
    async fn await_completion(
        &self,
        mut prediction: ReplicatePredictionsResponse,
    ) -> Result<ReplicatePredictionsResponse, ApiError> {
        while prediction.status.is_pending() {
            tracing::debug!(
                id = %prediction.id,
                status = ?prediction.status,
                "waiting for prediction"
            );
            sleep(self.poll_interval).await;

            prediction = self.get_prediction_by_id(&prediction.id).await?;
        }

        if prediction.status != ReplicatePredictionStatus::Succeeded {
            tracing::error!(
                id = %prediction.id,
                status = ?prediction.status,
                logs = ?prediction.logs,
                "prediction did not succeed"
            );
            return Err(ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: prediction.error_message(),
            });
        }

        Ok(prediction)
    }
}

#[async_trait]
impl ImageGenerator for ReplicateClient {
    async fn generate(&self, image_url: &str) -> Result<Vec<String>, ApiError> {
        let input_spec = provide_input_spec(image_url)?;

        tracing::debug!(model = ReplicateModel::MIRAGE_GHIBLI, %image_url, "creating prediction");

        let prediction = self.create_prediction(&input_spec).await?;
        let prediction = self.await_completion(prediction).await?;

        Ok(prediction.output_urls())
    }
}

fn provide_input_spec(image_url: &str) -> Result<InputSpec, ApiError> {
    let input = serde_json::to_value(InputSpecMirageGhibli::with_image(image_url)).map_err(|e| {
        tracing::error!(%e);
        DefaultApiError::InternalServerError.value()
    })?;

    Ok(InputSpec {
        version: ReplicateModelVersion::MIRAGE_GHIBLI.to_string(),
        input,
    })
}

async fn parse_prediction(
    operation: &str,
    result: Result<reqwest::Response, reqwest::Error>,
) -> Result<ReplicatePredictionsResponse, ApiError> {
    let res = match result {
        Ok(res) => res,
        Err(e) => {
            tracing::warn!("{} (1): {:?}", operation, e);
            return Err(DefaultApiError::InternalServerError.value());
        }
    };

    let status = res.status();
    let text = match res.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("{} (2): {:?}", operation, e);
            return Err(DefaultApiError::InternalServerError.value());
        }
    };

    if !status.is_success() {
        tracing::warn!("{} (3): {} {:?}", operation, status, text);
        return Err(ApiError {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Replicate returned status {}.", status),
        });
    }

    match serde_json::from_str(&text) {
        Ok(prediction) => Ok(prediction),
        Err(_) => {
            tracing::warn!("{} (4): {:?}", operation, text);
            Err(DefaultApiError::InternalServerError.value())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer, api_token: Option<&str>) -> ReplicateClient {
        ReplicateClient::new(
            reqwest::Client::new(),
            Some(server.uri()),
            api_token.map(str::to_string),
        )
        .with_poll_interval(Duration::from_millis(10))
    }

    #[tokio::test]
    async fn generate_sends_pinned_version_and_merged_input() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predictions"))
            .and(header("authorization", "Token r8_test"))
            .and(header("prefer", "wait"))
            .and(body_partial_json(json!({
                "version": ReplicateModelVersion::MIRAGE_GHIBLI,
                "input": {
                    "image": "https://example.com/cat.jpg",
                    "prompt": "Ghibli style photo with detailed rendering",
                    "num_outputs": 1
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p1",
                "status": "succeeded",
                "output": ["https://cdn.example/out.webp"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let urls = test_client(&server, Some("r8_test"))
            .generate("https://example.com/cat.jpg")
            .await
            .unwrap();

        assert_eq!(urls, vec!["https://cdn.example/out.webp"]);
    }

    #[tokio::test]
    async fn generate_polls_pending_prediction_until_done() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p2",
                "status": "processing",
                "output": null
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/predictions/p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p2",
                "status": "succeeded",
                "output": "https://cdn.example/single.webp"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let urls = test_client(&server, Some("r8_test"))
            .generate("https://example.com/cat.jpg")
            .await
            .unwrap();

        assert_eq!(urls, vec!["https://cdn.example/single.webp"]);
    }

    #[tokio::test]
    async fn generate_reports_failed_prediction() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p3",
                "status": "failed",
                "error": "CUDA out of memory"
            })))
            .mount(&server)
            .await;

        let err = test_client(&server, Some("r8_test"))
            .generate("https://example.com/cat.jpg")
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "CUDA out of memory");
    }

    #[tokio::test]
    async fn generate_returns_empty_list_for_empty_output() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p4",
                "status": "succeeded",
                "output": []
            })))
            .mount(&server)
            .await;

        let urls = test_client(&server, Some("r8_test"))
            .generate("https://example.com/cat.jpg")
            .await
            .unwrap();

        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn generate_fails_on_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/predictions"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid token." })),
            )
            .mount(&server)
            .await;

        let err = test_client(&server, Some("bad"))
            .generate("https://example.com/cat.jpg")
            .await
            .unwrap_err();

        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn generate_without_token_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = test_client(&server, None)
            .generate("https://example.com/cat.jpg")
            .await
            .unwrap_err();

        assert_eq!(err.message, "Replicate API token is not configured.");
    }
}

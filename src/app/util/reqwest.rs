use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

use crate::{app::models::api_error::ApiError, media::apis::ArtifactFetcher};

/// Downloads generated artifacts over plain HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ArtifactFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, ApiError> {
        get_bytes(&self.client, url).await
    }
}

pub async fn get_bytes(client: &reqwest::Client, url: &str) -> Result<Bytes, ApiError> {
    match client.get(url).send().await {
        Ok(res) => {
            let status = res.status();
            if !status.is_success() {
                tracing::error!(%url, %status, "get_bytes received non-success status");
                return Err(ApiError {
                    code: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("Download returned status {}.", status),
                });
            }

            match res.bytes().await {
                Ok(bytes) => Ok(bytes),
                Err(e) => {
                    tracing::error!(%e);
                    Err(ApiError {
                        code: StatusCode::INTERNAL_SERVER_ERROR,
                        message: "Failed to get bytes from response.".to_string(),
                    })
                }
            }
        }
        Err(e) => {
            tracing::error!(%e);
            Err(ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Failed to get url response.".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_returns_body_bytes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/out.webp"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(reqwest::Client::new());
        let bytes = fetcher
            .fetch(&format!("{}/out.webp", server.uri()))
            .await
            .unwrap();

        assert_eq!(bytes.as_ref(), &[1u8, 2, 3]);
    }

    #[tokio::test]
    async fn fetch_fails_on_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing.webp"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(reqwest::Client::new());
        let result = fetcher
            .fetch(&format!("{}/missing.webp", server.uri()))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("404"));
    }
}

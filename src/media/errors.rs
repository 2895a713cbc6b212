use axum::http::StatusCode;

use crate::app::{errors::DefaultApiError, models::api_error::ApiError};

/// Failures of the process pipeline. Only `MissingParameter` is the caller's
/// fault; every other variant renders as the same internal server error.
#[derive(Debug)]
pub enum MediaApiError {
    MissingParameter,
    Downstream(String),
    EmptyResult,
    DownloadFailed(String),
    UploadFailed(String),
}

impl MediaApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::MissingParameter => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Image URL is required.".to_string(),
            },
            Self::Downstream(_)
            | Self::EmptyResult
            | Self::DownloadFailed(_)
            | Self::UploadFailed(_) => DefaultApiError::InternalServerError.value(),
        }
    }
}

use axum::{extract::State, Json};

use crate::{
    app::models::{api_error::ApiError, json_from_request::JsonFromRequest},
    AppState,
};

use super::{
    dtos::process_image_dto::ProcessImageDto, errors::MediaApiError,
    models::process_image_response::ProcessImageResponse, service,
};

/// A `null` body is read as a request without an image URL.
pub async fn process_image(
    State(state): State<AppState>,
    JsonFromRequest(dto): JsonFromRequest<Option<ProcessImageDto>>,
) -> Result<Json<ProcessImageResponse>, ApiError> {
    let dto = dto.unwrap_or_default();

    match service::process_image(&dto, &state).await {
        Ok(output) => Ok(Json(ProcessImageResponse { output })),
        Err(e) => {
            match &e {
                MediaApiError::MissingParameter => tracing::warn!(?e, "process_image rejected"),
                _ => tracing::error!(?e, image_url = ?dto.image_url, "process_image failed"),
            }
            Err(e.value())
        }
    }
}

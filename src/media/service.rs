use validator::Validate;

use crate::AppState;

use super::{
    apis::{
        replicate::models::input_spec_mirage_ghibli::OUTPUT_FORMAT, ArtifactFetcher,
        ObjectStorage,
    },
    dtos::process_image_dto::ProcessImageDto,
    errors::MediaApiError,
    models::file_properties::FileProperties,
    util::file_name::{derive_file_name, mime_from_file_name},
};

/// Generates a stylized image and returns the URL handed back to the caller:
/// the stored copy when persistence is on, the generation output otherwise.
pub async fn process_image(
    dto: &ProcessImageDto,
    state: &AppState,
) -> Result<String, MediaApiError> {
    let dto = dto.sanitized();
    if dto.validate().is_err() {
        return Err(MediaApiError::MissingParameter);
    }
    let Some(image_url) = dto.image_url.as_deref() else {
        return Err(MediaApiError::MissingParameter);
    };

    let urls = state
        .generator
        .generate(image_url)
        .await
        .map_err(|e| MediaApiError::Downstream(e.message))?;

    let Some(output_url) = urls.into_iter().next() else {
        return Err(MediaApiError::EmptyResult);
    };

    match &state.storage {
        Some(storage) => {
            persist_output(&output_url, state.fetcher.as_ref(), storage.as_ref()).await
        }
        None => Ok(output_url),
    }
}

async fn persist_output(
    output_url: &str,
    fetcher: &dyn ArtifactFetcher,
    storage: &dyn ObjectStorage,
) -> Result<String, MediaApiError> {
    let data = fetcher
        .fetch(output_url)
        .await
        .map_err(|e| MediaApiError::DownloadFailed(e.message))?;

    let file_name = derive_file_name(output_url, OUTPUT_FORMAT);
    let file_properties = FileProperties {
        mime_type: mime_from_file_name(&file_name),
        file_name,
        data,
    };

    storage
        .upload(&file_properties)
        .await
        .map_err(|e| MediaApiError::UploadFailed(e.message))?;

    tracing::debug!(
        file_name = %file_properties.file_name,
        bytes = file_properties.data.len(),
        "stored generated image"
    );

    storage
        .public_url(&file_properties.file_name)
        .map_err(|e| MediaApiError::UploadFailed(e.message))
}

use mime::Mime;
use reqwest::Url;

pub const FILE_NAME_PREFIX: &str = "processed_";

/// Storage file name for a generated artifact: the prefix plus the base name
/// of the output locator. Query and fragment never contribute.
pub fn derive_file_name(output_url: &str, fallback_extension: &str) -> String {
    let base_name = match Url::parse(output_url) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        Err(_) => output_url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.split('/').filter(|s| !s.is_empty()).last())
            .map(str::to_string),
    };

    match base_name {
        Some(base_name) => [FILE_NAME_PREFIX, &base_name].concat(),
        None => format!("{}output.{}", FILE_NAME_PREFIX, fallback_extension),
    }
}

pub fn mime_from_file_name(file_name: &str) -> Mime {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => mime::IMAGE_PNG,
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("gif") => mime::IMAGE_GIF,
        Some("webp") => "image/webp"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

pub mod file_properties;
pub mod process_image_response;

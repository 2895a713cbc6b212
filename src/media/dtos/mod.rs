pub mod process_image_dto;

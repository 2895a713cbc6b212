pub mod input_spec;
pub mod input_spec_mirage_ghibli;

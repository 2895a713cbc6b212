pub mod supabase_error_response;
pub mod supabase_upload_response;

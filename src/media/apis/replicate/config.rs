use std::time::Duration;

pub const API_URL: &str = "https://api.replicate.com/v1";
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

use std::env;

use serde::Deserialize;

pub const DEFAULT_APP_ENV: &str = "development";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SUPABASE_BUCKET: &str = "images";

/// Process-wide configuration, read once at startup.
///
/// Every value is optional so a partially configured process still starts;
/// requests that need a missing value fail when they reach the collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub port: Option<u16>,

    pub replicate_api_token: Option<String>,
    pub replicate_api_url: Option<String>,

    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub supabase_bucket: Option<String>,

    pub persist_output: Option<bool>,
}

fn default_app_env() -> String {
    DEFAULT_APP_ENV.to_string()
}

impl Envy {
    /// Loads `.env.<APP_ENV>` when present, then deserializes the environment.
    pub fn load() -> Result<Self, envy::Error> {
        let app_env = env::var("APP_ENV").unwrap_or(DEFAULT_APP_ENV.to_string());
        let _ = dotenvy::from_filename(format!(".env.{}", app_env));

        envy::from_env::<Envy>()
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn persist_output(&self) -> bool {
        self.persist_output.unwrap_or(true)
    }

    pub fn replicate_api_token(&self) -> Option<String> {
        non_blank(&self.replicate_api_token)
    }

    pub fn replicate_api_url(&self) -> Option<String> {
        non_blank(&self.replicate_api_url)
    }

    pub fn supabase_url(&self) -> Option<String> {
        non_blank(&self.supabase_url)
    }

    pub fn supabase_key(&self) -> Option<String> {
        non_blank(&self.supabase_key)
    }

    pub fn supabase_bucket(&self) -> String {
        non_blank(&self.supabase_bucket).unwrap_or(DEFAULT_SUPABASE_BUCKET.to_string())
    }

    /// Names of the required variables that are unset or blank.
    pub fn missing_values(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();

        if self.replicate_api_token().is_none() {
            missing.push("REPLICATE_API_TOKEN");
        }

        if self.persist_output() {
            if self.supabase_url().is_none() {
                missing.push("SUPABASE_URL");
            }
            if self.supabase_key().is_none() {
                missing.push("SUPABASE_KEY");
            }
        }

        missing
    }

    pub fn log_missing_values(&self) {
        for name in self.missing_values() {
            tracing::warn!("{} is not set, requests depending on it will fail", name);
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

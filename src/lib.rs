use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    app::{env::Envy, util::reqwest::HttpFetcher},
    media::apis::{
        replicate::service::ReplicateClient, supabase::service::SupabaseStorage, ArtifactFetcher,
        ImageGenerator, ObjectStorage,
    },
};

pub mod app;
pub mod media;

pub const REQUEST_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn ImageGenerator>,
    pub fetcher: Arc<dyn ArtifactFetcher>,
    /// `None` disables the download and re-upload of generated images.
    pub storage: Option<Arc<dyn ObjectStorage>>,
}

impl AppState {
    pub fn from_envy(envy: &Envy) -> Self {
        let client = reqwest::Client::new();

        let generator = ReplicateClient::new(
            client.clone(),
            envy.replicate_api_url(),
            envy.replicate_api_token(),
        );

        let storage: Option<Arc<dyn ObjectStorage>> = match envy.persist_output() {
            true => Some(Arc::new(SupabaseStorage::new(
                client.clone(),
                envy.supabase_url(),
                envy.supabase_key(),
                envy.supabase_bucket(),
            ))),
            false => None,
        };

        Self {
            generator: Arc::new(generator),
            fetcher: Arc::new(HttpFetcher::new(client)),
            storage,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::GET]);

    Router::new()
        .route("/", get(app::controller::get_root))
        .route("/process", post(media::controller::process_image))
        .layer(DefaultBodyLimit::max(REQUEST_BODY_LIMIT))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envy_from(vars: &[(&str, &str)]) -> Envy {
        envy::from_iter(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
        )
        .unwrap()
    }

    #[test]
    fn persistence_is_on_by_default_even_without_storage_config() {
        let state = AppState::from_envy(&envy_from(&[]));

        assert!(state.storage.is_some());
    }

    #[test]
    fn persistence_switch_drops_storage() {
        let state = AppState::from_envy(&envy_from(&[("PERSIST_OUTPUT", "false")]));

        assert!(state.storage.is_none());
    }
}

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::platform::github::GitHubPlatform;
use crate::platform::Platform;

/// Process-wide state. Read-only after start-up.
pub struct AppState {
    pub config: AppConfig,
    pub platform: Arc<dyn Platform>,
}

impl AppState {
    pub fn new(config: AppConfig) -> crate::error::Result<Self> {
        let platform = GitHubPlatform::new(&config.github)?;

        Ok(Self::with_platform(config, Arc::new(platform)))
    }

    pub fn with_platform(config: AppConfig, platform: Arc<dyn Platform>) -> Self {
        Self { config, platform }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/repositories",
            post(crate::api::handler::create_repository),
        )
        .route("/health", get(crate::api::handler::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

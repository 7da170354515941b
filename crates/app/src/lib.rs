//! relaychat application composition root
//!
//! Builds the provider from configuration and mounts the relay routes
//! alongside the shared infrastructure routes.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use relaychat_common::Config;
use relaychat_llm::{LlmConfig, LlmService, LlmServiceFactory};
use relaychat_relay::RelayState;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

/// Create the application router, constructing the provider from `llm_config`
pub fn create_app(llm_config: LlmConfig) -> Result<Router, anyhow::Error> {
    let provider_timeout = llm_config.timeout;
    let llm: Arc<dyn LlmService> = Arc::from(LlmServiceFactory::create(llm_config)?);

    Ok(router(RelayState::new(llm, provider_timeout)))
}

/// Compose domain routes with infrastructure routes for a prepared state
pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "relaychat relay v0.0.1-SNAPSHOT" }),
        )
        .merge(relaychat_relay::routes().with_state(state))
}

/// CORS layer: any origin when `origins` is `None`, otherwise exactly the list
pub fn build_cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Reject request bodies larger than `max_bytes` with 413
pub fn body_limit_layer(max_bytes: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(max_bytes)
}

/// Apply CORS and body-limit layers from server configuration
pub fn with_middleware(app: Router, config: &Config) -> Router {
    app.layer(build_cors_layer(config.cors_allowed_origins.as_deref()))
        .layer(body_limit_layer(config.max_body_bytes))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

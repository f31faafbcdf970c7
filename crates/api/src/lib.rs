//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - The budget drafting endpoint
//! - Health endpoints
//! - Optional JWT authentication middleware
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;


use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, COOKIE};
use sentinel_core::draft::DraftService;
use sentinel_partition::Partitioner;
use sentinel_shared::JwtService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

/// Allowance for multipart framing and the text fields on top of the file
/// size limit.
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Budget drafting service.
    pub drafts: Arc<DraftService<Partitioner>>,
    /// JWT service for token validation. Authentication is disabled when
    /// `None`.
    pub jwt_service: Option<Arc<JwtService>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.drafts.max_file_size())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .merge(routes::health::root_routes())
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        // Keep tokens out of request traces
        .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION, COOKIE]))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

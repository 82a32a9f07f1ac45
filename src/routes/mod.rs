//! HTTP route handlers for the site.
//!
//! Routes are organized by content type, with per-route Cache-Control headers.
//! Pages use a short private cache because their language follows the session
//! cookie; static assets use a long immutable cache; the language switch is
//! never cached.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod language;
pub mod pages;

use axum::{middleware, routing::get, Extension, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use http::Uri;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

use crate::config::{CACHE_CONTROL_NO_STORE, CACHE_CONTROL_PAGE, CACHE_CONTROL_STATIC, STATIC_DIR};
use crate::error::{AppError, AppErrorResponse};
use crate::middleware::{language_layer, request_id_layer, RequestId};
use crate::state::AppState;

/// Fallback handler for paths no route matches.
async fn not_found(Extension(request_id): Extension<RequestId>, uri: Uri) -> AppErrorResponse {
    AppErrorResponse::new(AppError::NotFound(uri.path().to_string()), &request_id)
}

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Marketing pages - short private cache, content varies with the session
    let page_routes = Router::new()
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/services", get(pages::services))
        .route("/contact", get(pages::contact))
        .route("/nutrition", get(pages::nutrition))
        .route("/workout", get(pages::workout))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PAGE),
        ));

    // Language switch - stateful, never cached
    let language_routes = Router::new()
        .route("/set_language/{language}", get(language::set_language))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    // Static files - long cache with immutable hint
    let static_routes = Router::new()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_STATIC),
        ));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health));

    Router::new()
        .merge(page_routes)
        .merge(language_routes)
        .merge(health_routes)
        .merge(static_routes)
        .fallback(not_found)
        .with_state(state.clone())
        // Language layer - resolves the display language from the session cookie
        .layer(middleware::from_fn_with_state(state, language_layer))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

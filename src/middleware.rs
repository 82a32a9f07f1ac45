//! Request-scoped middleware.
//!
//! `request_id_layer` generates a UUID v4 for each incoming request and
//! creates a tracing span that wraps the entire request lifecycle, so all
//! logs emitted during request processing carry a request_id field.
//!
//! `language_layer` resolves the visitor's display language from the
//! session cookie (falling back to the configured default) and exposes it
//! to handlers as a [`CurrentLanguage`] extension.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::Instrument;
use uuid::Uuid;

use crate::i18n::Language;
use crate::session;
use crate::state::AppState;

/// Extension type for accessing the request ID in handlers.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Extension type carrying the language every handler should render in.
#[derive(Clone, Copy, Debug)]
pub struct CurrentLanguage(pub Language);

/// Middleware that generates a request ID and creates a request span.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
pub async fn request_id_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let path = uri.path();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    let mut request = request;
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}

/// Middleware that resolves the display language for the request.
///
/// The preference comes from the session cookie; missing or unreadable
/// cookies resolve to the configured default language.
pub async fn language_layer(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let language =
        session::language_from_jar(&jar).unwrap_or(state.config.i18n.default_language);

    request.extensions_mut().insert(CurrentLanguage(language));
    next.run(request).await
}

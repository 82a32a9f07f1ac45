//! Language switching route.
//!
//! GET /set_language/{language} stores the chosen language in the session
//! cookie and redirects back to the referring page. Unsupported codes are
//! ignored but still redirect, so the visitor never lands on an error page.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use http::{header, HeaderMap, Uri};
use tracing::instrument;

use crate::i18n::Language;
use crate::session;
use crate::state::AppState;

#[instrument(name = "language::set", skip(state, jar, headers), fields(code = %code))]
pub async fn set_language(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> (PrivateCookieJar, Redirect) {
    let referer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());
    let target = redirect_target(referer);

    let jar = match Language::from_code(&code) {
        Some(language) => {
            tracing::info!("Language preference updated");
            session::with_language(jar, language, &state.config.session)
        }
        None => {
            tracing::debug!("Ignoring unsupported language code");
            jar
        }
    };

    (jar, Redirect::to(&target))
}

/// Where to send the visitor after switching. Falls back to the homepage
/// when the Referer is absent or unusable.
fn redirect_target(referer: Option<&str>) -> String {
    referer
        .and_then(sanitize_referer)
        .unwrap_or_else(|| "/".to_string())
}

/// Reduce a Referer value to a safe same-site path to prevent open redirects.
fn sanitize_referer(referer: &str) -> Option<String> {
    let trimmed = referer.trim();

    // Absolute URLs are reduced to their path and query
    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        let uri: Uri = trimmed.parse().ok()?;
        uri.path_and_query()?.as_str().to_string()
    };

    // Must start with "/" (relative path)
    if !path.starts_with('/') {
        return None;
    }

    // Must not contain "//" which could be a protocol-relative URL
    if path.contains("//") {
        return None;
    }

    // Must not contain control characters or start with "/\"
    if path.starts_with("/\\") || path.chars().any(|c| c.is_control()) {
        return None;
    }

    Some(path)
}

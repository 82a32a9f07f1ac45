//! Handlers for the static marketing pages.
//!
//! Every page renders the same way: the shared layout plus a per-page
//! template, with the visitor's language driving which texts the `t`
//! template function resolves.

use axum::{extract::State, response::Html, Extension};
use tracing::instrument;

use crate::error::{AppError, AppErrorResponse, ResultExt};
use crate::i18n::Language;
use crate::middleware::{CurrentLanguage, RequestId};
use crate::state::AppState;

#[instrument(name = "pages::home", skip(state, request_id, language), fields(lang = %language))]
pub async fn home(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Extension(CurrentLanguage(language)): Extension<CurrentLanguage>,
) -> Result<Html<String>, AppErrorResponse> {
    render_page(&state, "home.html", language, &request_id)
}

#[instrument(name = "pages::about", skip(state, request_id, language), fields(lang = %language))]
pub async fn about(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Extension(CurrentLanguage(language)): Extension<CurrentLanguage>,
) -> Result<Html<String>, AppErrorResponse> {
    render_page(&state, "about.html", language, &request_id)
}

#[instrument(name = "pages::services", skip(state, request_id, language), fields(lang = %language))]
pub async fn services(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Extension(CurrentLanguage(language)): Extension<CurrentLanguage>,
) -> Result<Html<String>, AppErrorResponse> {
    render_page(&state, "services.html", language, &request_id)
}

#[instrument(name = "pages::contact", skip(state, request_id, language), fields(lang = %language))]
pub async fn contact(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Extension(CurrentLanguage(language)): Extension<CurrentLanguage>,
) -> Result<Html<String>, AppErrorResponse> {
    render_page(&state, "contact.html", language, &request_id)
}

#[instrument(name = "pages::nutrition", skip(state, request_id, language), fields(lang = %language))]
pub async fn nutrition(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Extension(CurrentLanguage(language)): Extension<CurrentLanguage>,
) -> Result<Html<String>, AppErrorResponse> {
    render_page(&state, "nutrition.html", language, &request_id)
}

#[instrument(name = "pages::workout", skip(state, request_id, language), fields(lang = %language))]
pub async fn workout(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Extension(CurrentLanguage(language)): Extension<CurrentLanguage>,
) -> Result<Html<String>, AppErrorResponse> {
    render_page(&state, "workout.html", language, &request_id)
}

/// Render a page template with the shared site context.
///
/// Templates receive:
/// - `config`: site name and version for the layout
/// - `lang`: the code of the language being rendered
/// - `languages`: entries for the header language switcher
fn render_page(
    state: &AppState,
    template: &str,
    language: Language,
    request_id: &RequestId,
) -> Result<Html<String>, AppErrorResponse> {
    let mut context = tera::Context::new();
    context.insert("config", &state.config.ui);
    context.insert("lang", language.code());
    context.insert("languages", &language_switcher(language));

    let html = state
        .tera
        .render(template, &context)
        .map_err(AppError::from)
        .with_request_id(request_id)?;
    Ok(Html(html))
}

fn language_switcher(current: Language) -> Vec<serde_json::Value> {
    Language::ALL
        .iter()
        .map(|language| {
            serde_json::json!({
                "code": language.code(),
                "label": language.native_name(),
                "active": *language == current,
            })
        })
        .collect()
}

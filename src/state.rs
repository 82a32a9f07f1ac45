//! Shared application state for request handlers.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use tera::Tera;

use crate::config::AppConfig;
use crate::i18n::TranslationStore;
use crate::session;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Contains the application configuration, Tera template engine, the
/// translation store, and the key that encrypts session cookies.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tera: Arc<Tera>,
    pub translations: Arc<TranslationStore>,
    cookie_key: Key,
}

impl AppState {
    /// Creates a new application state from the given configuration,
    /// templates, and translation store.
    pub fn new(config: AppConfig, tera: Tera, translations: Arc<TranslationStore>) -> Self {
        let cookie_key = session::cookie_key_from_config(&config.session);
        Self {
            config: Arc::new(config),
            tera: Arc::new(tera),
            translations,
            cookie_key,
        }
    }
}

/// Lets `PrivateCookieJar` pull its key straight out of the state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

//! Session cookie handling for the language preference.
//!
//! The preference lives in a single private (encrypted + authenticated)
//! cookie holding serialized [`SessionData`]. A cookie that fails to
//! decrypt or parse is treated as absent, so stale or tampered values
//! silently fall back to the default language.

use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use hkdf::Hkdf;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use time::Duration;

use crate::config::SessionConfig;
use crate::i18n::Language;

/// Cookie names used by the site.
pub mod cookie_names {
    /// Session cookie containing serialized [`super::SessionData`].
    pub const SESSION: &str = "jom_sihat_session";
}

/// Per-visitor state stored in the session cookie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// Chosen display language, if the visitor ever switched.
    pub language: Option<Language>,
}

/// Read the language preference out of the cookie jar.
///
/// Returns `None` when the cookie is missing, unreadable, or holds no
/// language; callers fall back to the configured default.
pub fn language_from_jar(jar: &PrivateCookieJar) -> Option<Language> {
    let cookie = jar.get(cookie_names::SESSION)?;
    match serde_json::from_str::<SessionData>(cookie.value()) {
        Ok(data) => data.language,
        Err(error) => {
            tracing::debug!(%error, "Ignoring unreadable session cookie");
            None
        }
    }
}

/// Store `language` in the session cookie and return the updated jar.
pub fn with_language(
    jar: PrivateCookieJar,
    language: Language,
    config: &SessionConfig,
) -> PrivateCookieJar {
    let data = SessionData {
        language: Some(language),
    };
    let value = match serde_json::to_string(&data) {
        Ok(value) => value,
        Err(error) => {
            tracing::error!(%error, "Failed to serialize session data");
            return jar;
        }
    };
    jar.add(session_cookie(value, config))
}

fn session_cookie(value: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((cookie_names::SESSION, value))
        .path("/")
        .http_only(true)
        .secure(config.production)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(config.max_age_days))
        .build()
}

/// Resolve the key that encrypts session cookies.
///
/// Without a configured secret the key is random, which keeps the site
/// working but invalidates existing cookies on every restart.
pub fn cookie_key_from_config(config: &SessionConfig) -> Key {
    match config.secret_key.as_deref() {
        Some(secret) if !secret.is_empty() => derive_cookie_key(secret),
        _ => {
            tracing::warn!(
                "No session secret configured; using a random cookie key, \
                 language preferences will not survive restarts"
            );
            Key::generate()
        }
    }
}

/// Derive a 64-byte cookie key from an arbitrary-length secret using HKDF
fn derive_cookie_key(secret: &str) -> Key {
    let hkdf = Hkdf::<Sha256>::new(None, secret.as_bytes());
    let mut key_bytes = [0u8; 64];
    hkdf.expand(b"jom-sihat-session-cookie", &mut key_bytes)
        .expect("64 bytes is a valid length for HKDF-SHA256");

    Key::from(&key_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_round_trips_through_jar() {
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = with_language(jar, Language::Ms, &SessionConfig::default());
        assert_eq!(language_from_jar(&jar), Some(Language::Ms));
    }

    #[test]
    fn empty_jar_has_no_language() {
        let jar = PrivateCookieJar::new(Key::generate());
        assert_eq!(language_from_jar(&jar), None);
    }

    #[test]
    fn unreadable_cookie_is_treated_as_absent() {
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = jar.add(Cookie::new(cookie_names::SESSION, "not json"));
        assert_eq!(language_from_jar(&jar), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("{}".to_string(), &SessionConfig::default());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    }

    #[test]
    fn production_cookie_is_secure() {
        let config = SessionConfig {
            production: true,
            ..SessionConfig::default()
        };
        let cookie = session_cookie("{}".to_string(), &config);
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn same_secret_derives_same_key() {
        let first = derive_cookie_key("correct horse battery staple");
        let second = derive_cookie_key("correct horse battery staple");
        assert_eq!(first.master(), second.master());

        let other = derive_cookie_key("different secret");
        assert_ne!(first.master(), other.master());
    }

    #[test]
    fn missing_secret_generates_random_key() {
        let config = SessionConfig::default();
        let first = cookie_key_from_config(&config);
        let second = cookie_key_from_config(&config);
        assert_ne!(first.master(), second.master());
    }

    #[test]
    fn configured_secret_is_used() {
        let config = SessionConfig {
            secret_key: Some("from-config".to_string()),
            ..SessionConfig::default()
        };
        let key = cookie_key_from_config(&config);
        assert_eq!(key.master(), derive_cookie_key("from-config").master());
    }
}

//! Graceful shutdown and signal handling.
//!
//! Handles:
//! - SIGTERM/SIGINT: Graceful shutdown with connection draining
//! - SIGHUP: Translation table reload

use std::sync::Arc;

use crate::i18n::TranslationStore;

/// Resolves when SIGTERM or Ctrl+C is received.
///
/// Passed to `axum::serve(...).with_graceful_shutdown(...)` so the server
/// stops accepting new connections and drains the existing ones.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Setup SIGHUP handler for translation reload.
///
/// When SIGHUP is received, the translation table is re-read from disk
/// without restarting. A failed reload keeps the current table.
#[cfg(unix)]
pub fn setup_reload_handler(translations: Arc<TranslationStore>) {
    tokio::spawn(async move {
        let mut sighup = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())
            .expect("Failed to install SIGHUP handler");

        loop {
            sighup.recv().await;
            tracing::info!("Received SIGHUP, reloading translations");

            match translations.reload() {
                Ok(()) => {
                    tracing::info!("Translations reloaded successfully");
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to reload translations, keeping current table");
                }
            }
        }
    });
}

/// No-op reload handler for non-Unix platforms.
#[cfg(not(unix))]
pub fn setup_reload_handler(_translations: Arc<TranslationStore>) {
    tracing::warn!("Translation hot-reload via SIGHUP not supported on this platform");
}

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use uuid::Uuid;

use crate::middleware::RequestId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),

    #[error("Page not found: {0}")]
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown on the error page. Internal detail stays in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(_) => self.to_string(),
            AppError::Template(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        AppErrorResponse::from(self).into_response()
    }
}

/// An [`AppError`] tagged with the ID of the request it occurred under,
/// so the error log line can be correlated with the request span.
#[derive(Debug)]
pub struct AppErrorResponse {
    error: AppError,
    request_id: Option<Uuid>,
}

impl AppErrorResponse {
    pub fn new(error: AppError, request_id: &RequestId) -> Self {
        Self {
            error,
            request_id: Some(request_id.0),
        }
    }
}

impl<E> From<E> for AppErrorResponse
where
    E: Into<AppError>,
{
    fn from(error: E) -> Self {
        Self {
            error: error.into(),
            request_id: None,
        }
    }
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            tracing::error!(
                request_id = self.request_id.map(tracing::field::display),
                error = %self.error,
                "Request failed"
            );
        } else {
            tracing::debug!(
                request_id = self.request_id.map(tracing::field::display),
                error = %self.error,
                "Request rejected"
            );
        }

        let message = self.error.public_message();
        let body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {}</title>
    <link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
    <div class="container">
        <div class="error-page">
            <h1>Error {}</h1>
            <p>{}</p>
            <a href="/">Return to homepage</a>
        </div>
    </div>
</body>
</html>"#,
            status.as_u16(),
            status.as_u16(),
            message
        );

        (status, Html(body)).into_response()
    }
}

/// Attaches the current request ID to errors propagating out of handlers.
pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse> {
        self.map_err(|error| AppErrorResponse {
            error: error.into(),
            request_id: Some(request_id.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let error = AppError::NotFound("/missing".to_string());
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert!(error.public_message().contains("/missing"));
    }

    #[test]
    fn template_errors_hide_detail() {
        let error = AppError::Template(tera::Error::msg("variable not found"));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), "Internal server error");
    }
}

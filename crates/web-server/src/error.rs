use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use database::DbError;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Template error: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Marks a response produced from an [`AppError`] so that
/// [`render_error_pages`] can replace its plain-text body with an HTML page.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Logs the error and picks what the client is told about it.
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Database(DbError::NotFound) => {
                (StatusCode::NOT_FOUND, "The requested record does not exist".to_string())
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Render(render_err) => {
                tracing::error!(error = ?render_err, "Template rendering error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The page could not be rendered".to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let mut response = (status, message.clone()).into_response();
        response.extensions_mut().insert(ErrorPage { status, message });
        response
    }
}

/// The JSON flavour of [`AppError`], used by the `/api` routes.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.0.status_and_message();
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

/// Response middleware that renders [`ErrorPage`] responses with the error template.
pub async fn render_error_pages(State(state): State<Arc<AppState>>, response: Response) -> Response {
    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };
    match state.views.render_error(page.status, &page.message) {
        Ok(html) => (page.status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "Failed to render error page.");
            response
        }
    }
}

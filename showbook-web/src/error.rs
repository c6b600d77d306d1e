//! Error types for showbook-web
//!
//! Page handlers answer with an HTML error page; the delete endpoints answer
//! with the `{"success": false, "error": ...}` JSON body the page script reads.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::views::pages;

/// Handler error rendered as an HTML error page
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Database driver error outside a repository call
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// showbook-common error
    #[error("Common error: {0}")]
    Common(#[from] showbook_common::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Common(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log server-side failures; the client only gets generic text
    fn log(&self, status: StatusCode) {
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        self.log(status);

        let page = if status == StatusCode::NOT_FOUND {
            pages::not_found()
        } else {
            pages::server_error()
        };

        (status, Html(page)).into_response()
    }
}

/// Error for the JSON delete endpoints
#[derive(Debug, Error)]
#[error(transparent)]
pub struct JsonError(#[from] ApiError);

impl From<showbook_common::Error> for JsonError {
    fn from(err: showbook_common::Error) -> Self {
        JsonError(ApiError::Common(err))
    }
}

impl From<sqlx::Error> for JsonError {
    fn from(err: sqlx::Error) -> Self {
        JsonError(ApiError::Database(err))
    }
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        self.0.log(status);

        let message = if status == StatusCode::NOT_FOUND {
            "Record not found.".to_string()
        } else {
            "An error occurred. The record could not be deleted.".to_string()
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result alias for page handlers
pub type ApiResult<T> = Result<T, ApiError>;

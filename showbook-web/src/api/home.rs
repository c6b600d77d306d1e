//! Home page and fallback

use axum::{http::StatusCode, response::Html};

use crate::views::pages;

/// GET /
pub async fn home_page() -> Html<String> {
    Html(pages::home())
}

/// Any path without a route
pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(pages::not_found()))
}

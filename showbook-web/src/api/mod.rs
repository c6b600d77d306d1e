//! HTTP handlers for showbook-web

use serde::Deserialize;

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod ui;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::{home_page, not_found};
pub use shows::show_routes;
pub use ui::{serve_app_css, serve_app_js};
pub use venues::venue_routes;

/// Query marker appended to the redirect after a successful create
///
/// Its presence turns on the one-shot "successfully listed" notice.
#[derive(Debug, Default, Deserialize)]
pub struct FlashQuery {
    pub listed: Option<String>,
}

impl FlashQuery {
    pub fn is_set(&self) -> bool {
        self.listed.is_some()
    }
}

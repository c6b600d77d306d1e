//! Venue pages and form submissions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use showbook_common::db::{shows, venues, VenueFields};
use showbook_common::time;
use sqlx::SqlitePool;
use tracing::info;

use crate::api::FlashQuery;
use crate::error::{ApiResult, JsonError};
use crate::forms::{FormErrors, FormFields, VenueForm};
use crate::views::forms as form_views;
use crate::views::models::{group_by_locality, SearchResults, VenueDetail};
use crate::views::pages::{self, Directory};
use crate::AppState;

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route(
            "/venues/:id/edit",
            get(edit_venue_form).post(edit_venue_submission),
        )
}

/// GET /venues
///
/// Venues grouped by (city, state), each with its own upcoming-show count
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let rows = venues::list_with_upcoming_counts(&mut conn, &time::now()).await?;
    Ok(Html(pages::venues_index(&group_by_locality(rows))))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Html<String>> {
    let term = FormFields::new(pairs).text("search_term");

    let mut conn = state.db.acquire().await?;
    let hits = venues::search(&mut conn, &term, &time::now()).await?;

    Ok(Html(pages::search_results(
        Directory::Venues,
        &SearchResults::new(&term, hits),
    )))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(flash): Query<FlashQuery>,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let venue = venues::get_venue(&mut conn, id).await?;
    let listings = shows::shows_at_venue(&mut conn, id).await?;

    let detail = VenueDetail::assemble(venue, listings, &time::now());
    let notice = flash
        .is_set()
        .then(|| format!("Venue {} was successfully listed!", detail.venue.name));
    Ok(Html(pages::venue_detail(&detail, notice.as_deref())))
}

/// GET /venues/create
pub async fn create_venue_form() -> Html<String> {
    Html(form_views::venue_form(
        "List a new venue",
        "/venues/create",
        &VenueForm::default(),
        &FormErrors::default(),
    ))
}

/// POST /venues/create
///
/// Success redirects (303) to the new detail page with a flash marker;
/// invalid input re-renders the form with status 400 and persists nothing.
pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let form = VenueForm::from_fields(&FormFields::new(pairs));

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            let page = form_views::venue_form("List a new venue", "/venues/create", &form, &errors);
            return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
        }
    };

    let id = insert_in_transaction(&state.db, &fields).await?;
    info!("Venue {} ({}) listed", id, fields.name);

    Ok(Redirect::to(&format!("/venues/{}?listed=1", id)).into_response())
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let venue = venues::get_venue(&mut conn, id).await?;

    Ok(Html(form_views::venue_form(
        "Edit venue",
        &format!("/venues/{}/edit", id),
        &VenueForm::from_venue(&venue),
        &FormErrors::default(),
    )))
}

/// POST /venues/:id/edit
///
/// Success redirects (303) to the detail page.
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let form = VenueForm::from_fields(&FormFields::new(pairs));

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            let action = format!("/venues/{}/edit", id);
            let page = form_views::venue_form("Edit venue", &action, &form, &errors);
            return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
        }
    };

    update_in_transaction(&state.db, id, &fields).await?;
    info!("Venue {} ({}) updated", id, fields.name);

    Ok(Redirect::to(&format!("/venues/{}", id)).into_response())
}

/// DELETE /venues/:id
///
/// Removes the venue and its shows; answers JSON for the page script.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, JsonError> {
    let mut tx = state.db.begin().await?;
    venues::delete_venue(&mut tx, id).await?;
    tx.commit().await?;

    info!("Venue {} deleted", id);
    Ok(Json(json!({ "success": true })))
}

async fn insert_in_transaction(
    db: &SqlitePool,
    fields: &VenueFields,
) -> showbook_common::Result<i64> {
    let mut tx = db.begin().await?;
    let id = venues::insert_venue(&mut tx, fields).await?;
    tx.commit().await?;
    Ok(id)
}

async fn update_in_transaction(
    db: &SqlitePool,
    id: i64,
    fields: &VenueFields,
) -> showbook_common::Result<()> {
    let mut tx = db.begin().await?;
    venues::update_venue(&mut tx, id, fields).await?;
    tx.commit().await?;
    Ok(())
}

//! Artist pages and form submissions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde_json::{json, Value};
use showbook_common::db::{artists, shows, ArtistFields};
use showbook_common::time;
use sqlx::SqlitePool;
use tracing::info;

use crate::api::FlashQuery;
use crate::error::{ApiResult, JsonError};
use crate::forms::{ArtistForm, FormErrors, FormFields};
use crate::views::forms as form_views;
use crate::views::models::{ArtistDetail, SearchResults};
use crate::views::pages::{self, Directory};
use crate::AppState;

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/:id", get(show_artist).delete(delete_artist))
        .route(
            "/artists/:id/edit",
            get(edit_artist_form).post(edit_artist_submission),
        )
}

/// GET /artists
///
/// Every artist by name
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let names = artists::list_names(&mut conn).await?;
    Ok(Html(pages::artists_index(&names)))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Html<String>> {
    let term = FormFields::new(pairs).text("search_term");

    let mut conn = state.db.acquire().await?;
    let hits = artists::search(&mut conn, &term, &time::now()).await?;

    Ok(Html(pages::search_results(
        Directory::Artists,
        &SearchResults::new(&term, hits),
    )))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(flash): Query<FlashQuery>,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let artist = artists::get_artist(&mut conn, id).await?;
    let listings = shows::shows_by_artist(&mut conn, id).await?;

    let detail = ArtistDetail::assemble(artist, listings, &time::now());
    let notice = flash
        .is_set()
        .then(|| format!("Artist {} was successfully listed!", detail.artist.name));
    Ok(Html(pages::artist_detail(&detail, notice.as_deref())))
}

/// GET /artists/create
pub async fn create_artist_form() -> Html<String> {
    Html(form_views::artist_form(
        "List a new artist",
        "/artists/create",
        &ArtistForm::default(),
        &FormErrors::default(),
    ))
}

/// POST /artists/create
///
/// Success redirects (303) to the new detail page with a flash marker;
/// invalid input re-renders the form with status 400 and persists nothing.
pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let form = ArtistForm::from_fields(&FormFields::new(pairs));

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            let page =
                form_views::artist_form("List a new artist", "/artists/create", &form, &errors);
            return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
        }
    };

    let id = insert_in_transaction(&state.db, &fields).await?;
    info!("Artist {} ({}) listed", id, fields.name);

    Ok(Redirect::to(&format!("/artists/{}?listed=1", id)).into_response())
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let artist = artists::get_artist(&mut conn, id).await?;

    Ok(Html(form_views::artist_form(
        "Edit artist",
        &format!("/artists/{}/edit", id),
        &ArtistForm::from_artist(&artist),
        &FormErrors::default(),
    )))
}

/// POST /artists/:id/edit
///
/// Success redirects (303) to the detail page; the artist's shows are kept.
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let form = ArtistForm::from_fields(&FormFields::new(pairs));

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            let action = format!("/artists/{}/edit", id);
            let page = form_views::artist_form("Edit artist", &action, &form, &errors);
            return Ok((StatusCode::BAD_REQUEST, Html(page)).into_response());
        }
    };

    update_in_transaction(&state.db, id, &fields).await?;
    info!("Artist {} ({}) updated", id, fields.name);

    Ok(Redirect::to(&format!("/artists/{}", id)).into_response())
}

/// DELETE /artists/:id
///
/// Removes the artist and its shows; answers JSON for the page script.
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, JsonError> {
    let mut tx = state.db.begin().await?;
    artists::delete_artist(&mut tx, id).await?;
    tx.commit().await?;

    info!("Artist {} deleted", id);
    Ok(Json(json!({ "success": true })))
}

async fn insert_in_transaction(
    db: &SqlitePool,
    fields: &ArtistFields,
) -> showbook_common::Result<i64> {
    let mut tx = db.begin().await?;
    let id = artists::insert_artist(&mut tx, fields).await?;
    tx.commit().await?;
    Ok(id)
}

async fn update_in_transaction(
    db: &SqlitePool,
    id: i64,
    fields: &ArtistFields,
) -> showbook_common::Result<()> {
    let mut tx = db.begin().await?;
    artists::update_artist(&mut tx, id, fields).await?;
    tx.commit().await?;
    Ok(())
}

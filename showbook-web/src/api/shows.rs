//! Show listing and booking

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use showbook_common::db::{artists, shows, venues, NewShow};
use sqlx::SqlitePool;
use tracing::info;

use crate::api::FlashQuery;
use crate::error::ApiResult;
use crate::forms::{FormErrors, FormFields, ShowForm};
use crate::views::forms as form_views;
use crate::views::pages;
use crate::AppState;

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route(
            "/shows/create",
            get(create_show_form).post(create_show_submission),
        )
}

/// GET /shows
pub async fn list_shows(
    State(state): State<AppState>,
    Query(flash): Query<FlashQuery>,
) -> ApiResult<Html<String>> {
    let mut conn = state.db.acquire().await?;
    let listings = shows::list_shows(&mut conn).await?;

    let notice = flash.is_set().then_some("Show was successfully listed!");
    Ok(Html(pages::shows_index(&listings, notice)))
}

/// GET /shows/create
pub async fn create_show_form(State(state): State<AppState>) -> ApiResult<Html<String>> {
    render_form(&state.db, &ShowForm::default(), &FormErrors::default()).await
}

/// POST /shows/create
///
/// Success redirects (303) to the show listing. Unknown artist or venue ids
/// are reported on their fields rather than surfacing as a foreign key
/// failure.
pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> ApiResult<Response> {
    let form = ShowForm::from_fields(&FormFields::new(pairs));

    let outcome = match form.validate() {
        Ok(show) => insert_checked(&state.db, &show).await?,
        Err(errors) => Err(errors),
    };

    match outcome {
        Ok(id) => {
            info!("Show {} listed", id);
            Ok(Redirect::to("/shows?listed=1").into_response())
        }
        Err(errors) => {
            let page = render_form(&state.db, &form, &errors).await?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
    }
}

async fn render_form(
    db: &SqlitePool,
    form: &ShowForm,
    errors: &FormErrors,
) -> ApiResult<Html<String>> {
    let mut conn = db.acquire().await?;
    let artist_choices = artists::list_names(&mut conn).await?;
    let venue_choices = venues::list_names(&mut conn).await?;

    Ok(Html(form_views::show_form(
        form,
        errors,
        &artist_choices,
        &venue_choices,
    )))
}

/// Insert after confirming both references exist, all in one transaction
async fn insert_checked(
    db: &SqlitePool,
    show: &NewShow,
) -> showbook_common::Result<Result<i64, FormErrors>> {
    let mut tx = db.begin().await?;

    let mut errors = FormErrors::default();
    if !artists::exists(&mut tx, show.artist_id).await? {
        errors.add("artist_id", "No artist with this id.");
    }
    if !venues::exists(&mut tx, show.venue_id).await? {
        errors.add("venue_id", "No venue with this id.");
    }
    if !errors.is_empty() {
        return Ok(Err(errors));
    }

    let id = shows::insert_show(&mut tx, show).await?;
    tx.commit().await?;
    Ok(Ok(id))
}

//! Integration tests for showbook-web routes
//!
//! Each test drives the full router against a fresh in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value;
use showbook_common::db::{
    artists, init_memory_database, shows, venues, ArtistFields, NewShow, VenueFields,
};
use showbook_web::{build_router, AppState};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: fresh store plus router sharing it
async fn setup_app() -> (Router, SqlitePool) {
    let pool = init_memory_database()
        .await
        .expect("Should open in-memory database");
    let app = build_router(AppState::new(pool.clone()));
    (app, pool)
}

/// Test helper: request without a body
fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: url-encoded form submission
fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: Extract HTML body from response
async fn extract_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

fn venue_fields(name: &str, city: &str, state: &str) -> VenueFields {
    VenueFields {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        genres: vec!["Jazz".to_string()],
        ..Default::default()
    }
}

fn artist_fields(name: &str) -> ArtistFields {
    ArtistFields {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: Some("326-123-5000".to_string()),
        genres: vec!["Rock n Roll".to_string()],
        ..Default::default()
    }
}

async fn seed_venue(pool: &SqlitePool, fields: &VenueFields) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    venues::insert_venue(&mut conn, fields).await.unwrap()
}

async fn seed_artist(pool: &SqlitePool, fields: &ArtistFields) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    artists::insert_artist(&mut conn, fields).await.unwrap()
}

async fn seed_show(pool: &SqlitePool, artist_id: i64, venue_id: i64, offset: Duration) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    let show = NewShow {
        artist_id,
        venue_id,
        start_time: Utc::now() + offset,
    };
    shows::insert_show(&mut conn, &show).await.unwrap()
}

async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

// =============================================================================
// Health, home and fallback
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = setup_app().await;

    let response = app.oneshot(test_request("GET", "/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "showbook-web");
    assert!(body["version"].is_string());
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_home_page() {
    let (app, _pool) = setup_app().await;

    let response = app.oneshot(test_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(extract_text(response.into_body()).await.contains("Showbook"));
}

#[tokio::test]
async fn test_unknown_path_is_404_page() {
    let (app, _pool) = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/no/such/page"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(extract_text(response.into_body()).await.contains("404"));
}

#[tokio::test]
async fn test_static_assets_served() {
    let (app, _pool) = setup_app().await;

    let response = app
        .clone()
        .oneshot(test_request("GET", "/static/app.js"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/javascript"
    );

    let response = app
        .oneshot(test_request("GET", "/static/app.css"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Venues
// =============================================================================

#[tokio::test]
async fn test_venue_listing_counts_per_venue() {
    let (app, pool) = setup_app().await;

    let hop = seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;
    seed_venue(
        &pool,
        &venue_fields("Park Square Live Music & Coffee", "San Francisco", "CA"),
    )
    .await;
    seed_venue(&pool, &venue_fields("The Dueling Pianos Bar", "New York", "NY")).await;
    let artist = seed_artist(&pool, &artist_fields("Guns N Petals")).await;
    seed_show(&pool, artist, hop, Duration::days(30)).await;
    seed_show(&pool, artist, hop, Duration::days(-30)).await;

    let response = app.oneshot(test_request("GET", "/venues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("San Francisco, CA"));
    assert!(html.contains("New York, NY"));
    assert!(html.contains(
        r#"<a href="/venues/1">The Musical Hop</a> <span class="count">1 upcoming</span>"#
    ));
    assert!(html.contains(
        r#"Park Square Live Music &amp; Coffee</a> <span class="count">0 upcoming</span>"#
    ));
}

#[tokio::test]
async fn test_venue_search() {
    let (app, pool) = setup_app().await;

    seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;
    seed_venue(
        &pool,
        &venue_fields("Park Square Live Music & Coffee", "San Francisco", "CA"),
    )
    .await;

    let response = app
        .clone()
        .oneshot(form_request("/venues/search", "search_term=hop"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#""hop": 1"#));
    assert!(html.contains("The Musical Hop"));

    let response = app
        .oneshot(form_request("/venues/search", "search_term=Music"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#""Music": 2"#));
}

#[tokio::test]
async fn test_create_venue_round_trips_genres() {
    let (app, pool) = setup_app().await;

    let body = "name=The+Musical+Hop&city=San+Francisco&state=ca\
        &address=1015+Folsom+Street&phone=123-123-1234\
        &genres=Jazz&genres=Reggae&genres=Jazz&genres=Classical\
        &website_link=https%3A%2F%2Fwww.themusicalhop.com\
        &seeking_talent=y&seeking_description=Looking+for+a+local+artist";

    let response = app
        .clone()
        .oneshot(form_request("/venues/create", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/venues/1?listed=1");

    let response = app
        .oneshot(test_request("GET", "/venues/1?listed=1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Venue The Musical Hop was successfully listed!"));

    let mut conn = pool.acquire().await.unwrap();
    let venue = venues::get_venue(&mut conn, 1).await.unwrap();
    assert_eq!(venue.state, "CA");
    assert_eq!(venue.genres, vec!["Jazz", "Reggae", "Classical"]);
    assert!(venue.seeking_talent);
    assert_eq!(
        venue.seeking_description.as_deref(),
        Some("Looking for a local artist")
    );
}

#[tokio::test]
async fn test_invalid_venue_rerenders_form_and_persists_nothing() {
    let (app, pool) = setup_app().await;

    let response = app
        .oneshot(form_request(
            "/venues/create",
            "name=The+Musical+Hop&city=&state=ZZ&address=1015+Folsom&phone=call+me&genres=Jazz",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("This field is required."));
    assert!(html.contains("Not a valid choice."));
    assert!(html.contains(r#"value="The Musical Hop""#));

    assert_eq!(count_rows(&pool, "venues").await, 0);
    assert_eq!(count_rows(&pool, "venue_genres").await, 0);
}

#[tokio::test]
async fn test_venue_detail_partitions_shows() {
    let (app, pool) = setup_app().await;

    let venue = seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;
    let artist = seed_artist(&pool, &artist_fields("Guns N Petals")).await;
    seed_show(&pool, artist, venue, Duration::days(-400)).await;
    seed_show(&pool, artist, venue, Duration::days(10)).await;
    seed_show(&pool, artist, venue, Duration::days(20)).await;

    let response = app
        .oneshot(test_request("GET", "/venues/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Upcoming Shows (2)"));
    assert!(html.contains("Past Shows (1)"));
    assert!(html.contains(r#"<a href="/artists/1">Guns N Petals</a>"#));
    assert!(!html.contains("successfully listed"));
}

#[tokio::test]
async fn test_missing_venue_is_404() {
    let (app, _pool) = setup_app().await;

    let response = app
        .clone()
        .oneshot(test_request("GET", "/venues/99"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(test_request("GET", "/venues/99/edit"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_integer_id_rejected() {
    let (app, _pool) = setup_app().await;

    let response = app
        .oneshot(test_request("GET", "/venues/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_venue_redirects_to_detail() {
    let (app, pool) = setup_app().await;
    seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;

    let response = app
        .oneshot(form_request(
            "/venues/1/edit",
            "name=The+Musical+Hop&city=Oakland&state=CA&address=1+Broadway&genres=Blues",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/venues/1");

    let mut conn = pool.acquire().await.unwrap();
    let venue = venues::get_venue(&mut conn, 1).await.unwrap();
    assert_eq!(venue.city, "Oakland");
    assert_eq!(venue.genres, vec!["Blues"]);
}

#[tokio::test]
async fn test_delete_venue_then_detail_is_404() {
    let (app, pool) = setup_app().await;

    let venue = seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;
    let artist = seed_artist(&pool, &artist_fields("Guns N Petals")).await;
    seed_show(&pool, artist, venue, Duration::days(5)).await;

    let response = app
        .clone()
        .oneshot(test_request("DELETE", "/venues/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app
        .oneshot(test_request("GET", "/venues/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(count_rows(&pool, "shows").await, 0);
    assert_eq!(count_rows(&pool, "artists").await, 1);
}

#[tokio::test]
async fn test_delete_missing_venue_reports_failure() {
    let (app, _pool) = setup_app().await;

    let response = app
        .oneshot(test_request("DELETE", "/venues/42"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Record not found.");
}

// =============================================================================
// Artists
// =============================================================================

#[tokio::test]
async fn test_artist_listing_and_search() {
    let (app, pool) = setup_app().await;

    seed_artist(&pool, &artist_fields("Guns N Petals")).await;
    seed_artist(&pool, &artist_fields("Matt Quevado")).await;
    seed_artist(&pool, &artist_fields("The Wild Sax Band")).await;

    let response = app
        .clone()
        .oneshot(test_request("GET", "/artists"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#"<a href="/artists/2">Matt Quevado</a>"#));

    let response = app
        .oneshot(form_request("/artists/search", "search_term=band"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#""band": 1"#));
    assert!(html.contains("The Wild Sax Band"));
}

#[tokio::test]
async fn test_create_artist_redirects_with_notice() {
    let (app, pool) = setup_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/artists/create",
            "name=Matt+Quevado&city=New+York&state=NY&genres=Jazz",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/artists/1?listed=1");

    let response = app
        .oneshot(test_request("GET", "/artists/1?listed=1"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Artist Matt Quevado was successfully listed!"));
    assert_eq!(count_rows(&pool, "artist_genres").await, 1);
}

#[tokio::test]
async fn test_edit_artist_updates_fields_and_keeps_shows() {
    let (app, pool) = setup_app().await;

    let venue = seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;
    let artist = seed_artist(&pool, &artist_fields("Guns N Petals")).await;
    seed_show(&pool, artist, venue, Duration::days(3)).await;

    let response = app
        .clone()
        .oneshot(test_request("GET", "/artists/1/edit"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#"value="Guns N Petals""#));

    let response = app
        .oneshot(form_request(
            "/artists/1/edit",
            "name=Guns+N+Petals&city=Seattle&state=WA&phone=326-123-5000\
             &genres=Rock+n+Roll&genres=Punk&seeking_venue=y\
             &seeking_description=Looking+for+shows",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/artists/1");

    let mut conn = pool.acquire().await.unwrap();
    let artist = artists::get_artist(&mut conn, 1).await.unwrap();
    assert_eq!(artist.city, "Seattle");
    assert_eq!(artist.state, "WA");
    assert_eq!(artist.genres, vec!["Rock n Roll", "Punk"]);
    assert!(artist.seeking_venue);
    assert_eq!(shows::shows_by_artist(&mut conn, 1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_artist() {
    let (app, pool) = setup_app().await;
    seed_artist(&pool, &artist_fields("Guns N Petals")).await;

    let response = app
        .oneshot(test_request("DELETE", "/artists/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response.into_body()).await["success"], true);
    assert_eq!(count_rows(&pool, "artists").await, 0);
}

// =============================================================================
// Shows
// =============================================================================

#[tokio::test]
async fn test_create_show() {
    let (app, pool) = setup_app().await;
    seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;
    seed_artist(&pool, &artist_fields("Guns N Petals")).await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/shows/create",
            "artist_id=1&venue_id=1&start_time=2035-04-01+20%3A00",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/shows?listed=1");

    let response = app
        .oneshot(test_request("GET", "/shows?listed=1"))
        .await
        .unwrap();
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Show was successfully listed!"));
    assert!(html.contains("Sunday April 1, 2035 at 8:00PM"));
    assert!(html.contains(r#"<a href="/venues/1">The Musical Hop</a>"#));
}

#[tokio::test]
async fn test_create_show_with_unknown_ids_is_field_error() {
    let (app, pool) = setup_app().await;
    seed_artist(&pool, &artist_fields("Guns N Petals")).await;

    let response = app
        .oneshot(form_request(
            "/shows/create",
            "artist_id=1&venue_id=7&start_time=2035-04-01+20%3A00",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = extract_text(response.into_body()).await;
    assert!(html.contains("No venue with this id."));
    assert!(!html.contains("No artist with this id."));
    assert!(html.contains(r#"<option value="1" selected>Guns N Petals</option>"#));

    assert_eq!(count_rows(&pool, "shows").await, 0);
}

#[tokio::test]
async fn test_create_show_with_unstorable_year_is_field_error() {
    let (app, pool) = setup_app().await;
    seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;
    seed_artist(&pool, &artist_fields("Guns N Petals")).await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/shows/create",
            "artist_id=1&venue_id=1&start_time=-0001-01-01+20%3A00",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains("Not a valid date and time"));
    assert_eq!(count_rows(&pool, "shows").await, 0);

    // Listing pages stay readable
    let response = app
        .clone()
        .oneshot(test_request("GET", "/shows"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(test_request("GET", "/venues/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_show_form_lists_choices() {
    let (app, pool) = setup_app().await;
    seed_venue(&pool, &venue_fields("The Musical Hop", "San Francisco", "CA")).await;

    let response = app
        .oneshot(test_request("GET", "/shows/create"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = extract_text(response.into_body()).await;
    assert!(html.contains(r#"<option value="1">The Musical Hop</option>"#));
}

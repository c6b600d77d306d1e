//! Show database operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

use super::{NewShow, Show, ShowListing};
use crate::time::{decode_timestamp, encode_timestamp};
use crate::{Error, Result};

/// Shows joined with their venue and artist
const SHOW_LISTING_SELECT: &str = r#"
    SELECT s.id AS show_id, s.start_time,
           v.id AS venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
           a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    JOIN artists a ON a.id = s.artist_id
"#;

/// Insert a show, returning the generated id
///
/// Dangling artist or venue ids fail on the foreign key constraint.
pub async fn insert_show(conn: &mut SqliteConnection, show: &NewShow) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO shows (artist_id, venue_id, start_time)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(show.artist_id)
    .bind(show.venue_id)
    .bind(encode_timestamp(&show.start_time))
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    debug!(
        "Inserted show {} (artist {} at venue {})",
        id, show.artist_id, show.venue_id
    );
    Ok(id)
}

/// Load a show by id
pub async fn get_show(conn: &mut SqliteConnection, id: i64) -> Result<Show> {
    let row = sqlx::query("SELECT id, artist_id, venue_id, start_time FROM shows WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("show {}", id)))?;

    let start_time: String = row.get("start_time");
    Ok(Show {
        id: row.get("id"),
        artist_id: row.get("artist_id"),
        venue_id: row.get("venue_id"),
        start_time: decode_timestamp(&start_time)?,
    })
}

/// Every show, earliest first
pub async fn list_shows(conn: &mut SqliteConnection) -> Result<Vec<ShowListing>> {
    let sql = format!("{} ORDER BY s.start_time, s.id", SHOW_LISTING_SELECT);
    let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
    rows.iter().map(listing_from_row).collect()
}

/// Shows booked at one venue, earliest first
pub async fn shows_at_venue(
    conn: &mut SqliteConnection,
    venue_id: i64,
) -> Result<Vec<ShowListing>> {
    let sql = format!(
        "{} WHERE s.venue_id = ? ORDER BY s.start_time, s.id",
        SHOW_LISTING_SELECT
    );
    let rows = sqlx::query(&sql)
        .bind(venue_id)
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(listing_from_row).collect()
}

/// Shows played by one artist, earliest first
pub async fn shows_by_artist(
    conn: &mut SqliteConnection,
    artist_id: i64,
) -> Result<Vec<ShowListing>> {
    let sql = format!(
        "{} WHERE s.artist_id = ? ORDER BY s.start_time, s.id",
        SHOW_LISTING_SELECT
    );
    let rows = sqlx::query(&sql)
        .bind(artist_id)
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(listing_from_row).collect()
}

fn listing_from_row(row: &SqliteRow) -> Result<ShowListing> {
    let start_time: String = row.get("start_time");
    Ok(ShowListing {
        show_id: row.get("show_id"),
        start_time: decode_timestamp(&start_time)?,
        venue_id: row.get("venue_id"),
        venue_name: row.get("venue_name"),
        venue_image_link: row.get("venue_image_link"),
        artist_id: row.get("artist_id"),
        artist_name: row.get("artist_name"),
        artist_image_link: row.get("artist_image_link"),
    })
}

//! Venue database operations

use chrono::{DateTime, Utc};
use sqlx::{Row, SqliteConnection};
use tracing::debug;

use super::genres::{self, GenreOwner};
use super::{
    non_empty, EntitySummary, NameMatcher, NamedRef, Venue, VenueFields, VenueLocalityRow,
};
use crate::time::encode_timestamp;
use crate::{Error, Result};

/// Insert a venue with its genres, returning the generated id
pub async fn insert_venue(conn: &mut SqliteConnection, fields: &VenueFields) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, image_link, facebook_link,
            website_link, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(non_empty(&fields.phone))
    .bind(non_empty(&fields.image_link))
    .bind(non_empty(&fields.facebook_link))
    .bind(non_empty(&fields.website_link))
    .bind(fields.seeking_talent)
    .bind(non_empty(&fields.seeking_description))
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    genres::replace_genres(conn, GenreOwner::Venue, id, &fields.genres).await?;

    debug!("Inserted venue {} ({})", id, fields.name);
    Ok(id)
}

/// Overwrite every editable column of a venue and its genre list
pub async fn update_venue(
    conn: &mut SqliteConnection,
    id: i64,
    fields: &VenueFields,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, city = ?, state = ?, address = ?, phone = ?, image_link = ?,
            facebook_link = ?, website_link = ?, seeking_talent = ?,
            seeking_description = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(&fields.address)
    .bind(non_empty(&fields.phone))
    .bind(non_empty(&fields.image_link))
    .bind(non_empty(&fields.facebook_link))
    .bind(non_empty(&fields.website_link))
    .bind(fields.seeking_talent)
    .bind(non_empty(&fields.seeking_description))
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }

    genres::replace_genres(conn, GenreOwner::Venue, id, &fields.genres).await?;
    Ok(())
}

/// Delete a venue together with its shows and genres
pub async fn delete_venue(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let shows = sqlx::query("DELETE FROM shows WHERE venue_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    genres::delete_genres(conn, GenreOwner::Venue, id).await?;

    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", id)));
    }

    debug!("Deleted venue {} and {} show(s)", id, shows);
    Ok(())
}

/// Load a venue by id
pub async fn get_venue(conn: &mut SqliteConnection, id: i64) -> Result<Venue> {
    let row = sqlx::query(
        r#"
        SELECT id, name, city, state, address, phone, image_link, facebook_link,
               website_link, seeking_talent, seeking_description
        FROM venues
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| Error::NotFound(format!("venue {}", id)))?;

    let genres = genres::load_genres(conn, GenreOwner::Venue, id).await?;

    Ok(Venue {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        address: row.get("address"),
        phone: row.get("phone"),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website_link: row.get("website_link"),
        genres,
        seeking_talent: row.get("seeking_talent"),
        seeking_description: row.get("seeking_description"),
    })
}

/// Check whether a venue id exists
pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM venues WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Every venue with its locality and its own upcoming-show count
///
/// Ordered by state, city, then name, so rows of one locality are adjacent.
pub async fn list_with_upcoming_counts(
    conn: &mut SqliteConnection,
    now: &DateTime<Utc>,
) -> Result<Vec<VenueLocalityRow>> {
    let rows = sqlx::query(
        r#"
        SELECT v.id, v.name, v.city, v.state, COUNT(s.id) AS upcoming_show_count
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time >= ?
        GROUP BY v.id, v.name, v.city, v.state
        ORDER BY v.state, v.city, v.name, v.id
        "#,
    )
    .bind(encode_timestamp(now))
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| VenueLocalityRow {
            id: row.get("id"),
            name: row.get("name"),
            city: row.get("city"),
            state: row.get("state"),
            upcoming_show_count: row.get("upcoming_show_count"),
        })
        .collect())
}

/// Case-insensitive substring search on venue names
///
/// Matching happens after the fetch (`NameMatcher`) so case folding
/// covers non-ASCII names, which SQLite `LIKE` does not. An empty term
/// matches every venue.
pub async fn search(
    conn: &mut SqliteConnection,
    term: &str,
    now: &DateTime<Utc>,
) -> Result<Vec<EntitySummary>> {
    let rows = sqlx::query(
        r#"
        SELECT v.id, v.name, COUNT(s.id) AS upcoming_show_count
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time >= ?
        GROUP BY v.id, v.name
        ORDER BY v.name, v.id
        "#,
    )
    .bind(encode_timestamp(now))
    .fetch_all(&mut *conn)
    .await?;

    let matcher = NameMatcher::new(term);
    Ok(rows
        .iter()
        .map(|row| EntitySummary {
            id: row.get("id"),
            name: row.get("name"),
            upcoming_show_count: row.get("upcoming_show_count"),
        })
        .filter(|summary| matcher.matches(&summary.name))
        .collect())
}

/// Id and name of every venue, ordered by name
pub async fn list_names(conn: &mut SqliteConnection) -> Result<Vec<NamedRef>> {
    let rows = sqlx::query("SELECT id, name FROM venues ORDER BY name, id")
        .fetch_all(&mut *conn)
        .await?;

    Ok(rows
        .iter()
        .map(|row| NamedRef {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

//! Artist database operations

use chrono::{DateTime, Utc};
use sqlx::{Row, SqliteConnection};
use tracing::debug;

use super::genres::{self, GenreOwner};
use super::{non_empty, Artist, ArtistFields, EntitySummary, NameMatcher, NamedRef};
use crate::time::encode_timestamp;
use crate::{Error, Result};

/// Insert an artist with its genres, returning the generated id
pub async fn insert_artist(conn: &mut SqliteConnection, fields: &ArtistFields) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, image_link, facebook_link, website_link,
            seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(non_empty(&fields.phone))
    .bind(non_empty(&fields.image_link))
    .bind(non_empty(&fields.facebook_link))
    .bind(non_empty(&fields.website_link))
    .bind(fields.seeking_venue)
    .bind(non_empty(&fields.seeking_description))
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    genres::replace_genres(conn, GenreOwner::Artist, id, &fields.genres).await?;

    debug!("Inserted artist {} ({})", id, fields.name);
    Ok(id)
}

/// Overwrite every editable column of an artist and its genre list
///
/// The artist's shows are not touched.
pub async fn update_artist(
    conn: &mut SqliteConnection,
    id: i64,
    fields: &ArtistFields,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, image_link = ?,
            facebook_link = ?, website_link = ?, seeking_venue = ?,
            seeking_description = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.city)
    .bind(&fields.state)
    .bind(non_empty(&fields.phone))
    .bind(non_empty(&fields.image_link))
    .bind(non_empty(&fields.facebook_link))
    .bind(non_empty(&fields.website_link))
    .bind(fields.seeking_venue)
    .bind(non_empty(&fields.seeking_description))
    .bind(id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }

    genres::replace_genres(conn, GenreOwner::Artist, id, &fields.genres).await?;
    Ok(())
}

/// Delete an artist together with its shows and genres
pub async fn delete_artist(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let shows = sqlx::query("DELETE FROM shows WHERE artist_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    genres::delete_genres(conn, GenreOwner::Artist, id).await?;

    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", id)));
    }

    debug!("Deleted artist {} and {} show(s)", id, shows);
    Ok(())
}

/// Load an artist by id
pub async fn get_artist(conn: &mut SqliteConnection, id: i64) -> Result<Artist> {
    let row = sqlx::query(
        r#"
        SELECT id, name, city, state, phone, image_link, facebook_link,
               website_link, seeking_venue, seeking_description
        FROM artists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| Error::NotFound(format!("artist {}", id)))?;

    let genres = genres::load_genres(conn, GenreOwner::Artist, id).await?;

    Ok(Artist {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        phone: row.get("phone"),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website_link: row.get("website_link"),
        genres,
        seeking_venue: row.get("seeking_venue"),
        seeking_description: row.get("seeking_description"),
    })
}

/// Check whether an artist id exists
pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Id and name of every artist, ordered by name
pub async fn list_names(conn: &mut SqliteConnection) -> Result<Vec<NamedRef>> {
    let rows = sqlx::query("SELECT id, name FROM artists ORDER BY name, id")
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

/// Case-insensitive substring search on artist names
///
/// Matching happens after the fetch (`NameMatcher`) so case folding
/// covers non-ASCII names, which SQLite `LIKE` does not. An empty term
/// matches every artist.
pub async fn search(
    conn: &mut SqliteConnection,
    term: &str,
    now: &DateTime<Utc>,
) -> Result<Vec<EntitySummary>> {
    let rows = sqlx::query(
        r#"
        SELECT a.id, a.name, COUNT(s.id) AS upcoming_show_count
        FROM artists a
        LEFT JOIN shows s ON s.artist_id = a.id AND s.start_time >= ?
        GROUP BY a.id, a.name
        ORDER BY a.name, a.id
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

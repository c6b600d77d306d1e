//! Ordered genre lists for venues and artists
//!
//! Each owner's genres live in a linking table keyed by (owner id, position),
//! so the list reads back in exactly the order it was written.

use crate::Result;
use sqlx::SqliteConnection;

/// Which linking table a genre list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreOwner {
    Venue,
    Artist,
}

impl GenreOwner {
    fn table(self) -> &'static str {
        match self {
            GenreOwner::Venue => "venue_genres",
            GenreOwner::Artist => "artist_genres",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            GenreOwner::Venue => "venue_id",
            GenreOwner::Artist => "artist_id",
        }
    }
}

/// Replace an owner's genre list
pub async fn replace_genres(
    conn: &mut SqliteConnection,
    owner: GenreOwner,
    owner_id: i64,
    genres: &[String],
) -> Result<()> {
    delete_genres(conn, owner, owner_id).await?;

    let insert_sql = format!(
        "INSERT INTO {} ({}, position, genre) VALUES (?, ?, ?)",
        owner.table(),
        owner.owner_column()
    );

    for (position, genre) in genres.iter().enumerate() {
        sqlx::query(&insert_sql)
            .bind(owner_id)
            .bind(position as i64)
            .bind(genre)
            .execute(&mut *conn)
            .await?;
    }

    Ok(())
}

/// Load an owner's genres in stored order
pub async fn load_genres(
    conn: &mut SqliteConnection,
    owner: GenreOwner,
    owner_id: i64,
) -> Result<Vec<String>> {
    let select_sql = format!(
        "SELECT genre FROM {} WHERE {} = ? ORDER BY position",
        owner.table(),
        owner.owner_column()
    );

    let genres = sqlx::query_scalar::<_, String>(&select_sql)
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(genres)
}

/// Remove every genre row of an owner
pub async fn delete_genres(
    conn: &mut SqliteConnection,
    owner: GenreOwner,
    owner_id: i64,
) -> Result<()> {
    let delete_sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        owner.table(),
        owner.owner_column()
    );

    sqlx::query(&delete_sql)
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

//! Favorites repository
//!
//! `(user_id, book_id)` is unique in the schema, so inserts use
//! `ON CONFLICT DO NOTHING` and concurrent requests cannot create duplicates.

use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookRow},
        borrow::Favorite,
    },
};

#[derive(Clone)]
pub struct FavoritesRepository {
    pool: Pool<Sqlite>,
}

impl FavoritesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn find_favorite(&self, user_id: i64, book_id: i64) -> AppResult<Option<Favorite>> {
        let favorite = sqlx::query_as::<_, Favorite>(
            "SELECT id, user_id, book_id FROM favorites WHERE user_id = ? AND book_id = ?",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(favorite)
    }

    /// Bring the favorite to the requested state. Returns whether anything changed.
    pub async fn set_favorite(&self, user_id: i64, book_id: i64, favorite: bool) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;
        let changed = write_state(&mut *tx, user_id, book_id, favorite).await?;
        tx.commit().await?;
        Ok(changed)
    }

    /// Flip the favorite inside one transaction. Returns the new state.
    pub async fn toggle_favorite(&self, user_id: i64, book_id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let removed = write_state(&mut *tx, user_id, book_id, false).await?;
        if !removed {
            write_state(&mut *tx, user_id, book_id, true).await?;
        }

        tx.commit().await?;
        Ok(!removed)
    }

    /// Books the user has favorited, owned or not
    pub async fn find_favorite_books(&self, user_id: i64) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT b.*
            FROM books b
            JOIN favorites f ON f.book_id = b.id
            WHERE f.user_id = ?
            ORDER BY f.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }
}

async fn write_state(
    conn: &mut SqliteConnection,
    user_id: i64,
    book_id: i64,
    favorite: bool,
) -> AppResult<bool> {
    let result = if favorite {
        sqlx::query(
            "INSERT INTO favorites (user_id, book_id) VALUES (?, ?) ON CONFLICT (user_id, book_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(book_id)
        .execute(&mut *conn)
        .await?
    } else {
        sqlx::query("DELETE FROM favorites WHERE user_id = ? AND book_id = ?")
            .bind(user_id)
            .bind(book_id)
            .execute(&mut *conn)
            .await?
    };

    Ok(result.rows_affected() > 0)
}

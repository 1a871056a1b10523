//! Borrows repository for database operations

use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::borrow::{Borrow, BorrowDetails},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Sqlite>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get borrow by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Borrow> {
        sqlx::query_as::<_, Borrow>("SELECT * FROM borrows WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow with id {} not found", id)))
    }

    /// Borrows of a user, open ones first
    pub async fn find_borrows_by_user(&self, user_id: i64) -> AppResult<Vec<BorrowDetails>> {
        let borrows = sqlx::query_as::<_, BorrowDetails>(
            r#"
            SELECT br.id, br.book_id, b.title, b.author,
                   br.borrow_date, br.return_date, br.returned
            FROM borrows br
            JOIN books b ON b.id = br.book_id
            WHERE br.user_id = ?
            ORDER BY br.returned, br.borrow_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(borrows)
    }

    /// Open a borrow and mark the book unavailable
    pub async fn create(&self, user_id: i64, book_id: i64) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let state: Option<(bool, bool)> =
            sqlx::query_as("SELECT available, archived FROM books WHERE id = ?")
                .bind(book_id)
                .fetch_optional(&mut *tx)
                .await?;

        match state {
            None => return Err(AppError::NotFound(format!("Book with id {} not found", book_id))),
            Some((_, true)) => {
                return Err(AppError::BusinessRule("Archived books cannot be borrowed.".to_string()))
            }
            Some((false, _)) => {
                return Err(AppError::BusinessRule("This book is already borrowed.".to_string()))
            }
            Some((true, false)) => {}
        }

        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrows (user_id, book_id, borrow_date, returned)
            VALUES (?, ?, ?, 0)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::on_unique_violation(e, "This book is already borrowed."))?;

        sqlx::query("UPDATE books SET available = 0 WHERE id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(borrow)
    }

    /// Close an open borrow and make the book available again
    pub async fn return_borrow(&self, id: i64) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            UPDATE borrows
            SET returned = 1, return_date = ?
            WHERE id = ? AND returned = 0
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::BusinessRule("This borrow has already been returned.".to_string()))?;

        sqlx::query("UPDATE books SET available = 1 WHERE id = ?")
            .bind(borrow.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(borrow)
    }
}

//! Books repository for database operations

use sqlx::{Pool, QueryBuilder, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDraft, BookFilter, BookRow, ReadingStatus},
};

const DUPLICATE_ISBN: &str = "A book with this ISBN already exists.";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, BookRow>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Book::from)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Books owned by `user_id` matching every criterion of `filter`
    pub async fn find_books_by_owner(&self, user_id: i64, filter: &BookFilter) -> AppResult<Vec<Book>> {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT b.* FROM books b WHERE b.user_id = ");
        query.push_bind(user_id);

        if let Some(ref category) = filter.category {
            query.push(" AND b.category = ").push_bind(category.clone());
        }

        if filter.favorites_only {
            query
                .push(" AND EXISTS (SELECT 1 FROM favorites f WHERE f.book_id = b.id AND f.user_id = ")
                .push_bind(user_id)
                .push(")");
        }

        query.push(" ORDER BY b.id");

        let rows = query
            .build_query_as::<BookRow>()
            .fetch_all(&self.pool)
            .await?;

        // SQLite's LOWER() only folds ASCII, so the text search runs here
        Ok(rows
            .into_iter()
            .map(Book::from)
            .filter(|book| filter.matches_search(book))
            .collect())
    }

    /// Create a new book owned by `user_id`
    pub async fn create(&self, user_id: i64, draft: &BookDraft) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BookRow>(
            r#"
            INSERT INTO books (title, author, published_year, isbn, category, status, format, user_id)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(draft.published_year)
        .bind(&draft.isbn)
        .bind(&draft.category)
        .bind(draft.status.as_str())
        .bind(draft.format.as_str())
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::on_unique_violation(e, DUPLICATE_ISBN))?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Overwrite the editable fields of a book
    pub async fn update(&self, id: i64, draft: &BookDraft) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, BookRow>(
            r#"
            UPDATE books
            SET title = ?, author = ?, published_year = ?, isbn = ?,
                category = ?, status = ?, format = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.author)
        .bind(draft.published_year)
        .bind(&draft.isbn)
        .bind(&draft.category)
        .bind(draft.status.as_str())
        .bind(draft.format.as_str())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::on_unique_violation(e, DUPLICATE_ISBN))?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        tx.commit().await?;
        Ok(row.into())
    }

    /// Delete a book; its favorites and borrows cascade
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn set_status(&self, id: i64, status: ReadingStatus) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE books SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn set_notes(&self, id: i64, notes: Option<&str>) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE books SET notes = ? WHERE id = ?")
            .bind(notes)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

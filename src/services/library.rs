//! Library query and mutation service
//!
//! Listing and filtering of a user's books, ownership checks on every
//! mutation, status and note edits, and favorites.

use rand::seq::SliceRandom;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookFilter, BookForm, BookListing, ListingQuery, ReadingStatus},
        Identity,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LibraryService {
    repository: Repository,
}

impl LibraryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// The caller's books matching the query, with a random featured book
    pub async fn list_books(&self, identity: &Identity, query: &ListingQuery) -> AppResult<BookListing> {
        let filter = BookFilter::from(query);
        let books = self
            .repository
            .books
            .find_books_by_owner(identity.user_id, &filter)
            .await?;

        let featured_book = books.choose(&mut rand::thread_rng()).cloned();

        Ok(BookListing { books, featured_book })
    }

    /// Any book by ID (detail view)
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Load a book and make sure the caller owns it.
    ///
    /// `action` completes "You are not authorized to ... this book."
    pub async fn owned_book(&self, identity: &Identity, id: i64, action: &str) -> AppResult<Book> {
        let book = self.repository.books.get_by_id(id).await?;

        if !book.is_owned_by(identity.user_id) {
            tracing::warn!(
                user_id = identity.user_id,
                book_id = id,
                owner_id = book.user_id,
                "Refused to {} a book owned by another user",
                action
            );
            return Err(AppError::Authorization(format!(
                "You are not authorized to {} this book.",
                action
            )));
        }

        Ok(book)
    }

    pub async fn create_book(&self, identity: &Identity, form: &BookForm) -> AppResult<Book> {
        let draft = form.to_draft()?;
        let book = self.repository.books.create(identity.user_id, &draft).await?;
        tracing::info!(user_id = identity.user_id, book_id = book.id, "Book added");
        Ok(book)
    }

    pub async fn update_book(&self, identity: &Identity, id: i64, form: &BookForm) -> AppResult<Book> {
        self.owned_book(identity, id, "edit").await?;
        let draft = form.to_draft()?;
        self.repository.books.update(id, &draft).await
    }

    pub async fn delete_book(&self, identity: &Identity, id: i64) -> AppResult<()> {
        self.owned_book(identity, id, "delete").await?;
        self.repository.books.delete(id).await?;
        tracing::info!(user_id = identity.user_id, book_id = id, "Book deleted");
        Ok(())
    }

    /// Flip Read/Unread and return the new status
    pub async fn toggle_status(&self, identity: &Identity, id: i64) -> AppResult<ReadingStatus> {
        let book = self.owned_book(identity, id, "modify").await?;
        let status = book.status.toggled();
        self.repository.books.set_status(id, status).await?;
        Ok(status)
    }

    /// Overwrite the notes with whatever was submitted
    pub async fn edit_notes(&self, identity: &Identity, id: i64, notes: Option<&str>) -> AppResult<()> {
        self.owned_book(identity, id, "edit the notes of").await?;
        self.repository.books.set_notes(id, notes).await
    }

    pub async fn is_favorite(&self, identity: &Identity, book_id: i64) -> AppResult<bool> {
        Ok(self
            .repository
            .favorites
            .find_favorite(identity.user_id, book_id)
            .await?
            .is_some())
    }

    /// Idempotently set the favorite state; returns whether it changed
    pub async fn set_favorite(&self, identity: &Identity, book_id: i64, favorite: bool) -> AppResult<bool> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository
            .favorites
            .set_favorite(identity.user_id, book_id, favorite)
            .await
    }

    /// Flip the favorite state; returns the new state
    pub async fn toggle_favorite(&self, identity: &Identity, book_id: i64) -> AppResult<bool> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository
            .favorites
            .toggle_favorite(identity.user_id, book_id)
            .await
    }

    pub async fn favorite_books(&self, identity: &Identity) -> AppResult<Vec<Book>> {
        self.repository.favorites.find_favorite_books(identity.user_id).await
    }
}

//! Borrow tracking service

use crate::{
    error::{AppError, AppResult},
    models::{Borrow, BorrowDetails, Identity},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrows of the caller
    pub async fn list_borrows(&self, identity: &Identity) -> AppResult<Vec<BorrowDetails>> {
        self.repository.borrows.find_borrows_by_user(identity.user_id).await
    }

    /// Borrow an available book
    pub async fn borrow_book(&self, identity: &Identity, book_id: i64) -> AppResult<Borrow> {
        let borrow = self.repository.borrows.create(identity.user_id, book_id).await?;
        tracing::info!(user_id = identity.user_id, book_id, borrow_id = borrow.id, "Book borrowed");
        Ok(borrow)
    }

    /// Return a borrow; only the borrower or the book's owner may do so
    pub async fn return_borrow(&self, identity: &Identity, borrow_id: i64) -> AppResult<Borrow> {
        let borrow = self.repository.borrows.get_by_id(borrow_id).await?;

        if borrow.user_id != identity.user_id {
            let book = self.repository.books.get_by_id(borrow.book_id).await?;
            if !book.is_owned_by(identity.user_id) {
                tracing::warn!(user_id = identity.user_id, borrow_id, "Refused to return a foreign borrow");
                return Err(AppError::Authorization(
                    "You are not authorized to return this book.".to_string(),
                ));
            }
        }

        if !borrow.is_open() {
            return Err(AppError::BusinessRule(
                "This borrow has already been returned.".to_string(),
            ));
        }

        self.repository.borrows.return_borrow(borrow_id).await
    }
}

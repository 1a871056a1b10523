//! Data models for LibraryHub

pub mod book;
pub mod borrow;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookFilter, BookForm, BookFormat, ReadingStatus};
pub use borrow::{Borrow, BorrowDetails, Favorite};
pub use user::{Identity, LoginForm, RegisterForm, User};

use validator::ValidationErrors;

/// Flatten validator errors into one user-facing sentence, sorted by field name
pub(crate) fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages: Vec<String> = Vec::new();
    for (field, errs) in fields {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
    }
    messages.join(" ")
}

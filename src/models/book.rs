//! Book model, reading status, format and form payloads

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::validation_message;
use crate::error::{AppError, AppResult};

/// Reading progress of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReadingStatus {
    Unread,
    Reading,
    Read,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [ReadingStatus::Unread, ReadingStatus::Reading, ReadingStatus::Read];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::Unread => "Unread",
            ReadingStatus::Reading => "Reading",
            ReadingStatus::Read => "Read",
        }
    }

    /// Status after a toggle: `Read` becomes `Unread`, anything else becomes `Read`.
    /// `Reading` is only ever reached through the edit form.
    pub fn toggled(self) -> Self {
        match self {
            ReadingStatus::Read => ReadingStatus::Unread,
            ReadingStatus::Unread | ReadingStatus::Reading => ReadingStatus::Read,
        }
    }
}

impl Default for ReadingStatus {
    fn default() -> Self {
        ReadingStatus::Unread
    }
}

impl std::fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unread" => Ok(ReadingStatus::Unread),
            "Reading" => Ok(ReadingStatus::Reading),
            "Read" => Ok(ReadingStatus::Read),
            _ => Err(format!("Invalid status: {}", s)),
        }
    }
}

/// Physical medium of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookFormat {
    #[serde(rename = "E-book")]
    Ebook,
    Physical,
}

impl BookFormat {
    pub const ALL: [BookFormat; 2] = [BookFormat::Ebook, BookFormat::Physical];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookFormat::Ebook => "E-book",
            BookFormat::Physical => "Physical",
        }
    }
}

impl std::fmt::Display for BookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E-book" => Ok(BookFormat::Ebook),
            "Physical" => Ok(BookFormat::Physical),
            _ => Err(format!("Invalid format: {}", s)),
        }
    }
}

/// Internal row structure for database queries (with String enum columns)
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    id: i64,
    title: String,
    author: String,
    published_year: i32,
    isbn: String,
    available: bool,
    category: Option<String>,
    status: String,
    description: Option<String>,
    notes: Option<String>,
    archived: bool,
    format: String,
    user_id: i64,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            title: row.title,
            author: row.author,
            published_year: row.published_year,
            isbn: row.isbn,
            available: row.available,
            category: row.category,
            // CHECK constraints keep both columns within the known values
            status: row.status.parse().unwrap_or_default(),
            description: row.description,
            notes: row.notes,
            archived: row.archived,
            format: row.format.parse().unwrap_or(BookFormat::Physical),
            user_id: row.user_id,
        }
    }
}

/// Full book model
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub isbn: String,
    pub available: bool,
    pub category: Option<String>,
    pub status: ReadingStatus,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub archived: bool,
    pub format: BookFormat,
    /// Owning user
    pub user_id: i64,
}

impl Book {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Add/edit book form, as submitted by the browser
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Published year is required"))]
    pub published_year: String,
    #[validate(length(min = 1, max = 13, message = "ISBN is required (at most 13 characters)"))]
    pub isbn: String,
    pub category: Option<String>,
    pub status: Option<String>,
    #[validate(length(min = 1, message = "Format is required"))]
    pub format: String,
}

impl BookForm {
    /// Prefill the form from an existing book (edit view)
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            published_year: book.published_year.to_string(),
            isbn: book.isbn.clone(),
            category: book.category.clone(),
            status: Some(book.status.to_string()),
            format: book.format.to_string(),
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            published_year: self.published_year.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            category: self.category.as_deref().map(str::trim).map(String::from),
            status: self.status.as_deref().map(str::trim).map(String::from),
            format: self.format.trim().to_string(),
        }
    }

    /// Validate the submitted fields and convert them to typed values
    pub fn to_draft(&self) -> AppResult<BookDraft> {
        let form = self.trimmed();
        form.validate()
            .map_err(|e| AppError::Validation(validation_message(&e)))?;

        let published_year = form
            .published_year
            .parse::<i32>()
            .map_err(|_| AppError::Validation("Published year must be a whole number".to_string()))?;

        let status = match form.status.as_deref() {
            None | Some("") => ReadingStatus::default(),
            Some(s) => s.parse().map_err(AppError::Validation)?,
        };

        let format = form.format.parse().map_err(AppError::Validation)?;

        Ok(BookDraft {
            title: form.title,
            author: form.author,
            published_year,
            isbn: form.isbn,
            category: form.category.filter(|c| !c.is_empty()),
            status,
            format,
        })
    }
}

/// Validated book fields, used for both creation and update
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub isbn: String,
    pub category: Option<String>,
    pub status: ReadingStatus,
    pub format: BookFormat,
}

/// Notes form; the detail page posts `note`, the notes editor posts `notes`
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct NoteForm {
    pub notes: Option<String>,
    pub note: Option<String>,
}

impl NoteForm {
    /// Submitted text; `notes` wins when both fields are present
    pub fn text(&self) -> Option<&str> {
        self.notes.as_deref().or(self.note.as_deref())
    }
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(default)]
pub struct ListingQuery {
    /// Free text matched against title or author
    pub search: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Only favorited books (`favorites` is accepted too)
    #[serde(alias = "favorites")]
    pub favorites_only: Option<String>,
}

/// Normalized listing filter; every present criterion must hold
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub favorites_only: bool,
}

impl From<&ListingQuery> for BookFilter {
    fn from(query: &ListingQuery) -> Self {
        let favorites_only = match query.favorites_only.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) => !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "off"),
        };

        BookFilter {
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
            category: query.category.clone().filter(|c| !c.is_empty()),
            favorites_only,
        }
    }
}

impl BookFilter {
    /// Whether the search text occurs in the title or the author.
    /// Both sides are folded with full Unicode lowercasing and matched literally.
    pub fn matches_search(&self, book: &Book) -> bool {
        match self.search {
            None => true,
            Some(ref search) => {
                let needle = search.to_lowercase();
                book.title.to_lowercase().contains(&needle) || book.author.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Filtered books plus a featured pick, recomputed on every listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookListing {
    pub books: Vec<Book>,
    pub featured_book: Option<Book>,
}

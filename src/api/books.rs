//! Book listing, forms, detail view and owner-only mutations

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookForm, ListingQuery, NoteForm},
        Book, BookFormat, Identity, ReadingStatus,
    },
    AppState,
};

use super::{flash_outcome, AuthenticatedUser, Flash};

/// Listing page: the caller's filtered books and a featured pick
#[derive(Serialize, ToSchema)]
pub struct LibraryPage {
    pub user: Identity,
    pub books: Vec<Book>,
    pub featured_book: Option<Book>,
}

/// Add/edit form view
#[derive(Serialize, ToSchema)]
pub struct BookFormView {
    /// Set when editing an existing book
    pub book_id: Option<i64>,
    pub form: BookForm,
    pub statuses: Vec<ReadingStatus>,
    pub formats: Vec<BookFormat>,
    pub flash: Option<Flash>,
}

impl BookFormView {
    fn new(book_id: Option<i64>, form: BookForm, flash: Option<Flash>) -> Self {
        Self {
            book_id,
            form,
            statuses: ReadingStatus::ALL.to_vec(),
            formats: BookFormat::ALL.to_vec(),
            flash,
        }
    }

    /// Hand the submitted form back with the failure, or soft-deny a non-owner
    fn failed(book_id: Option<i64>, form: BookForm, error: AppError, retry: String) -> AppResult<Response> {
        match error {
            e @ AppError::NotFound(_) => Err(e),
            AppError::Authorization(msg) => Ok(Flash::danger(msg, "/").into_response()),
            e => {
                e.log();
                let status = e.status_code();
                let flash = Flash::danger(e.user_message(), retry);
                Ok((status, Json(BookFormView::new(book_id, form, Some(flash)))).into_response())
            }
        }
    }
}

/// Detail page
#[derive(Serialize, ToSchema)]
pub struct BookDetailPage {
    pub book: Book,
    pub is_owner: bool,
    pub is_favorite: bool,
}

/// List the caller's books
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    security(("session_cookie" = [])),
    params(ListingQuery),
    responses(
        (status = 200, description = "Filtered books and a featured book", body = LibraryPage),
        (status = 303, description = "Not logged in", body = Flash)
    )
)]
pub async fn index(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(query): Query<ListingQuery>,
) -> AppResult<Json<LibraryPage>> {
    let listing = state.services.library.list_books(&identity, &query).await?;

    Ok(Json(LibraryPage {
        user: identity,
        books: listing.books,
        featured_book: listing.featured_book,
    }))
}

/// Empty add form
#[utoipa::path(
    get,
    path = "/add-book",
    tag = "books",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Add form", body = BookFormView)
    )
)]
pub async fn add_book_page(AuthenticatedUser(_identity): AuthenticatedUser) -> Json<BookFormView> {
    Json(BookFormView::new(None, BookForm::default(), None))
}

/// Create a book owned by the caller
#[utoipa::path(
    post,
    path = "/add-book",
    tag = "books",
    security(("session_cookie" = [])),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book added", body = Flash),
        (status = 400, description = "Invalid fields", body = BookFormView),
        (status = 409, description = "Duplicate ISBN", body = BookFormView)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let result = state.services.library.create_book(&identity, &form).await;
    match result {
        Ok(_) => Ok(Flash::success("Book added successfully!", "/").into_response()),
        Err(e) => BookFormView::failed(None, form, e, "/add-book".to_string()),
    }
}

/// Edit form prefilled with the book's values
#[utoipa::path(
    get,
    path = "/edit-book/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Edit form", body = BookFormView),
        (status = 303, description = "Not the owner", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_book_page(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    match state.services.library.owned_book(&identity, id, "edit").await {
        Ok(book) => Ok(Json(BookFormView::new(Some(id), BookForm::from_book(&book), None)).into_response()),
        Err(AppError::Authorization(msg)) => Ok(Flash::danger(msg, "/").into_response()),
        Err(e) => Err(e),
    }
}

/// Update a book (owner only)
#[utoipa::path(
    post,
    path = "/edit-book/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Book updated, or refused for a non-owner", body = Flash),
        (status = 400, description = "Invalid fields", body = BookFormView),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Duplicate ISBN", body = BookFormView)
    )
)]
pub async fn edit_book(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
    Form(form): Form<BookForm>,
) -> AppResult<Response> {
    let result = state.services.library.update_book(&identity, id, &form).await;
    match result {
        Ok(_) => Ok(Flash::success("Book updated successfully!", "/").into_response()),
        Err(e) => BookFormView::failed(Some(id), form, e, format!("/edit-book/{}", id)),
    }
}

/// Delete a book (owner only)
#[utoipa::path(
    post,
    path = "/delete-book/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Book deleted, or refused for a non-owner", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Flash> {
    let result = state
        .services
        .library
        .delete_book(&identity, id)
        .await
        .map(|_| Flash::success("Book deleted successfully!", "/"));

    flash_outcome(result, "/")
}

/// Book detail, visible to any logged-in user
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book detail", body = BookDetailPage),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_detail(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Json<BookDetailPage>> {
    let book = state.services.library.get_book(id).await?;
    let is_favorite = state.services.library.is_favorite(&identity, id).await?;

    Ok(Json(BookDetailPage {
        is_owner: book.is_owned_by(identity.user_id),
        book,
        is_favorite,
    }))
}

/// Save the note from the detail page (owner only)
#[utoipa::path(
    post,
    path = "/book/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Note saved, or refused for a non-owner", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn save_note(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
    Form(form): Form<NoteForm>,
) -> AppResult<Flash> {
    let detail = format!("/book/{}", id);
    let result = state
        .services
        .library
        .edit_notes(&identity, id, form.text())
        .await
        .map(|_| Flash::success("Note saved successfully!", detail.clone()));

    flash_outcome(result, &detail)
}

/// Flip Read/Unread (owner only)
#[utoipa::path(
    post,
    path = "/toggle_status/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Status flipped, or refused for a non-owner", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn toggle_status(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Flash> {
    let result = state
        .services
        .library
        .toggle_status(&identity, id)
        .await
        .map(|_| Flash::success("Book status updated successfully!", "/"));

    flash_outcome(result, "/")
}

/// Overwrite the notes (owner only); a missing field clears them
#[utoipa::path(
    post,
    path = "/edit-notes/{id}",
    tag = "books",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Notes updated, or refused for a non-owner", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn edit_notes(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
    Form(form): Form<NoteForm>,
) -> AppResult<Flash> {
    let detail = format!("/book/{}", id);
    let result = state
        .services
        .library
        .edit_notes(&identity, id, form.text())
        .await
        .map(|_| Flash::success("Notes updated successfully!", detail.clone()));

    flash_outcome(result, &detail)
}

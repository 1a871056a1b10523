//! Borrow endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::BorrowDetails, AppState};

use super::{flash_outcome, AuthenticatedUser, Flash};

/// Borrows of the caller, open ones first
#[utoipa::path(
    get,
    path = "/borrows",
    tag = "borrows",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "The caller's borrows", body = Vec<BorrowDetails>)
    )
)]
pub async fn list_borrows(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> AppResult<Json<Vec<BorrowDetails>>> {
    let borrows = state.services.borrows.list_borrows(&identity).await?;
    Ok(Json(borrows))
}

/// Borrow an available book
#[utoipa::path(
    post,
    path = "/borrow/{id}",
    tag = "borrows",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Borrowed, or refused when unavailable", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Flash> {
    let result = state
        .services
        .borrows
        .borrow_book(&identity, id)
        .await
        .map(|_| Flash::success("Book borrowed successfully!", "/borrows"));

    flash_outcome(result, &format!("/book/{}", id))
}

/// Return a borrow (borrower or book owner)
#[utoipa::path(
    post,
    path = "/return/{id}",
    tag = "borrows",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Borrow ID")),
    responses(
        (status = 303, description = "Returned, or refused", body = Flash),
        (status = 404, description = "Borrow not found")
    )
)]
pub async fn return_borrow(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Flash> {
    let result = state
        .services
        .borrows
        .return_borrow(&identity, id)
        .await
        .map(|_| Flash::success("Book returned successfully!", "/borrows"));

    flash_outcome(result, "/borrows")
}

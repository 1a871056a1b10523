//! Favorite endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use crate::{error::AppResult, models::Book, AppState};

use super::{flash_outcome, referrer_path, AuthenticatedUser, Flash};

/// Books the caller marked as favorite
#[utoipa::path(
    get,
    path = "/favorites",
    tag = "favorites",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Favorite books", body = Vec<Book>)
    )
)]
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.library.favorite_books(&identity).await?;
    Ok(Json(books))
}

/// Mark a book as favorite, then go back where the user came from
#[utoipa::path(
    post,
    path = "/add_favorite/{id}",
    tag = "favorites",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirect to the referrer or the listing", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AppResult<Flash> {
    let back = referrer_path(&headers).unwrap_or_else(|| "/".to_string());
    let result = state
        .services
        .library
        .set_favorite(&identity, id, true)
        .await
        .map(|added| {
            if added {
                Flash::success("Book added to your favorites.", back.clone())
            } else {
                Flash::info("Book is already in your favorites.", back.clone())
            }
        });

    flash_outcome(result, &back)
}

/// Unmark a favorite, then go back where the user came from
#[utoipa::path(
    post,
    path = "/remove-favorite/{id}",
    tag = "favorites",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirect to the referrer or the favorites page", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> AppResult<Flash> {
    let back = referrer_path(&headers).unwrap_or_else(|| "/favorites".to_string());
    let result = state
        .services
        .library
        .set_favorite(&identity, id, false)
        .await
        .map(|removed| {
            if removed {
                Flash::success("Book removed from your favorites.", back.clone())
            } else {
                Flash::warning("Book not found in your favorites.", back.clone())
            }
        });

    flash_outcome(result, &back)
}

/// Flip the favorite state
#[utoipa::path(
    post,
    path = "/toggle_favorite/{id}",
    tag = "favorites",
    security(("session_cookie" = [])),
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Redirect to the listing", body = Flash),
        (status = 404, description = "Book not found")
    )
)]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<Flash> {
    let result = state
        .services
        .library
        .toggle_favorite(&identity, id)
        .await
        .map(|now_favorite| {
            if now_favorite {
                Flash::success("Added to Favorites", "/")
            } else {
                Flash::success("Removed from Favorites", "/")
            }
        });

    flash_outcome(result, "/")
}

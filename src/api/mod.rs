//! HTTP handlers for LibraryHub
//!
//! Mutations answer with a redirect carrying a flash message; pages answer
//! with the JSON document a template would render.

pub mod auth;
pub mod books;
pub mod borrows;
pub mod favorites;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, LOCATION, REFERER},
        request::Parts,
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use serde::Serialize;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use utoipa::ToSchema;

use crate::{error::{AppError, AppResult}, models::Identity, AppState};

/// Name of the cookie holding the session token
pub const SESSION_COOKIE: &str = "libraryhub_session";

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Info,
    Warning,
    Danger,
}

/// Transient message shown after a redirect
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
    /// Where the browser is sent
    pub redirect: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            redirect: redirect.into(),
        }
    }

    pub fn success(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message, redirect)
    }

    pub fn info(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message, redirect)
    }

    pub fn warning(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self::new(FlashLevel::Warning, message, redirect)
    }

    pub fn danger(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self::new(FlashLevel::Danger, message, redirect)
    }
}

impl IntoResponse for Flash {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [(LOCATION, self.redirect.clone())],
            Json(self),
        )
            .into_response()
    }
}

/// Turn the failure of a redirecting mutation into a user-visible flash.
///
/// Ownership refusals go back to the listing; persistence failures go to
/// `fallback` so the user can retry. Unknown ids stay a 404.
pub(crate) fn flash_outcome(result: AppResult<Flash>, fallback: &str) -> AppResult<Flash> {
    match result {
        Ok(flash) => Ok(flash),
        Err(AppError::NotFound(msg)) => Err(AppError::NotFound(msg)),
        Err(AppError::Authorization(msg)) => Ok(Flash::danger(msg, "/")),
        Err(e) => {
            e.log();
            Ok(Flash::danger(e.user_message(), fallback))
        }
    }
}

/// Local path of the `Referer` header, if it has one
pub(crate) fn referrer_path(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(REFERER)?.to_str().ok()?;
    let path = match value.find("://") {
        Some(idx) => {
            let rest = &value[idx + 3..];
            &rest[rest.find('/')?..]
        }
        None => value,
    };

    if path.starts_with('/') && !path.starts_with("//") {
        Some(path.to_string())
    } else {
        None
    }
}

fn login_required() -> Flash {
    Flash::warning("Please log in to continue.", "/login")
}

/// Extractor for the authenticated caller, from the session cookie or a bearer token
pub struct AuthenticatedUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = Flash;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);

        let token = bearer
            .or_else(|| {
                CookieJar::from_headers(&parts.headers)
                    .get(SESSION_COOKIE)
                    .map(|cookie| cookie.value().to_string())
            })
            .ok_or_else(login_required)?;

        state
            .services
            .users
            .identity_from_token(&token)
            .map(AuthenticatedUser)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {}", e);
                login_required()
            })
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let app = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Books
        .route("/", get(books::index))
        .route("/add-book", get(books::add_book_page).post(books::add_book))
        .route("/edit-book/:id", get(books::edit_book_page).post(books::edit_book))
        .route("/delete-book/:id", post(books::delete_book))
        .route("/book/:id", get(books::book_detail).post(books::save_note))
        .route("/toggle_status/:id", post(books::toggle_status))
        .route("/edit-notes/:id", post(books::edit_notes))
        // Favorites
        .route("/favorites", get(favorites::list_favorites))
        .route("/add_favorite/:id", post(favorites::add_favorite))
        .route("/remove-favorite/:id", post(favorites::remove_favorite))
        .route("/toggle_favorite/:id", post(favorites::toggle_favorite))
        // Borrows
        .route("/borrows", get(borrows::list_borrows))
        .route("/borrow/:id", post(borrows::borrow_book))
        .route("/return/:id", post(borrows::return_borrow))
        .with_state(state);

    Router::new()
        .merge(app)
        .merge(openapi::create_openapi_router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

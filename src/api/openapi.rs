//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, borrows, favorites, health, SESSION_COOKIE};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LibraryHub",
        version = "0.1.0",
        description = "Personal library management",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register_page,
        auth::register,
        auth::login_page,
        auth::login,
        auth::logout,
        // Books
        books::index,
        books::add_book_page,
        books::add_book,
        books::edit_book_page,
        books::edit_book,
        books::delete_book,
        books::book_detail,
        books::save_note,
        books::toggle_status,
        books::edit_notes,
        // Favorites
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::remove_favorite,
        favorites::toggle_favorite,
        // Borrows
        borrows::list_borrows,
        borrows::borrow_book,
        borrows::return_borrow,
    ),
    components(
        schemas(
            // Shared
            crate::api::Flash,
            crate::api::FlashLevel,
            crate::models::Identity,
            // Auth
            auth::AuthPage,
            crate::models::user::RegisterForm,
            crate::models::user::LoginForm,
            // Books
            books::LibraryPage,
            books::BookFormView,
            books::BookDetailPage,
            crate::models::book::Book,
            crate::models::book::BookForm,
            crate::models::book::NoteForm,
            crate::models::book::ReadingStatus,
            crate::models::book::BookFormat,
            // Borrows
            crate::models::borrow::Borrow,
            crate::models::borrow::BorrowDetails,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SessionCookie),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and sessions"),
        (name = "books", description = "Personal book collection"),
        (name = "favorites", description = "Favorite books"),
        (name = "borrows", description = "Lending records")
    )
)]
pub struct ApiDoc;

/// Declares the session cookie used by `security(("session_cookie" = []))`
struct SessionCookie;

impl Modify for SessionCookie {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

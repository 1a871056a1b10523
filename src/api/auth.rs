//! Registration, login and logout

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{LoginForm, RegisterForm},
    AppState,
};

use super::{Flash, SESSION_COOKIE};

/// Register/login form view. Submitted values are echoed back, the password never is.
#[derive(Serialize, ToSchema)]
pub struct AuthPage {
    pub username: Option<String>,
    pub email: Option<String>,
    pub flash: Option<Flash>,
}

impl AuthPage {
    fn failed(error: AppError, username: Option<String>, email: String, retry: &str) -> Response {
        error.log();
        let status = error.status_code();
        let page = AuthPage {
            username,
            email: Some(email),
            flash: Some(Flash::danger(error.user_message(), retry)),
        };
        (status, Json(page)).into_response()
    }
}

fn session_cookie(state: &AppState, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.auth.secure_cookie)
        .build()
}

/// Registration form view
#[utoipa::path(
    get,
    path = "/register",
    tag = "auth",
    responses(
        (status = 200, description = "Empty registration form", body = AuthPage)
    )
)]
pub async fn register_page() -> Json<AuthPage> {
    Json(AuthPage {
        username: None,
        email: None,
        flash: None,
    })
}

/// Create an account and log it in
#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registered and logged in", body = Flash),
        (status = 400, description = "Missing fields", body = AuthPage),
        (status = 409, description = "Email already registered", body = AuthPage)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let result = state.services.users.register(&form).await;
    match result {
        Ok((_, token)) => (
            jar.add(session_cookie(&state, token)),
            Flash::success("Registration successful! Welcome!", "/"),
        )
            .into_response(),
        Err(e) => AuthPage::failed(e, Some(form.username), form.email, "/register"),
    }
}

/// Login form view
#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses(
        (status = 200, description = "Empty login form", body = AuthPage)
    )
)]
pub async fn login_page() -> Json<AuthPage> {
    Json(AuthPage {
        username: None,
        email: None,
        flash: None,
    })
}

/// Authenticate and start a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in", body = Flash),
        (status = 400, description = "Missing fields", body = AuthPage),
        (status = 401, description = "Invalid email or password", body = AuthPage)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let result = state.services.users.authenticate(&form).await;
    match result {
        Ok((user, token)) => (
            jar.add(session_cookie(&state, token)),
            Flash::success(format!("Welcome back, {}!", user.name), "/"),
        )
            .into_response(),
        Err(e) => AuthPage::failed(e, None, form.email, "/login"),
    }
}

/// End the session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 303, description = "Session cookie cleared", body = Flash)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Flash) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        Flash::info("You have been logged out.", "/login"),
    )
}

//! API integration tests
//!
//! Each test drives the full router against its own in-memory database.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use libraryhub_server::{
    api,
    config::AppConfig,
    repository::{self, Repository},
    services::Services,
    AppState,
};

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    set_cookie: Option<String>,
    body: Value,
}

impl TestResponse {
    fn flash_level(&self) -> &str {
        self.body["level"].as_str().unwrap_or_default()
    }

    fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

async fn test_app() -> Router {
    let mut config = AppConfig::default();
    config.database.url = "sqlite::memory:".to_string();
    config.auth.secret_key = "integration_test_secret".to_string();

    let pool = repository::connect(&config.database)
        .await
        .expect("Failed to open in-memory database");
    let services = Services::new(Repository::new(pool), config.auth.clone());

    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("Request failed");

    let status = response.status();
    let header_value = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let location = header_value(header::LOCATION);
    let set_cookie = header_value(header::SET_COOKIE);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        location,
        set_cookie,
        body,
    }
}

async fn get(app: &Router, path: &str, cookie: Option<&str>) -> TestResponse {
    let mut request = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    send(app, request.body(Body::empty()).unwrap()).await
}

async fn post_form(app: &Router, path: &str, cookie: Option<&str>, form: &str) -> TestResponse {
    let mut request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    send(app, request.body(Body::from(form.to_string())).unwrap()).await
}

/// Register a user and return the session cookie to send back
async fn register(app: &Router, name: &str, email: &str) -> String {
    let response = post_form(
        app,
        "/register",
        None,
        &format!("username={}&email={}&password=secret", name, email),
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    session_from(&response)
}

fn session_from(response: &TestResponse) -> String {
    response
        .set_cookie
        .as_deref()
        .and_then(|c| c.split(';').next())
        .expect("No session cookie")
        .to_string()
}

/// Add a book and return its ID
async fn add_book(app: &Router, cookie: &str, title: &str, author: &str, isbn: &str, category: &str) -> i64 {
    let response = post_form(
        app,
        "/add-book",
        Some(cookie),
        &format!(
            "title={}&author={}&published_year=1965&isbn={}&category={}&format=Physical",
            title, author, isbn, category
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.message(), "Book added successfully!");

    let listing = get(app, "/", Some(cookie)).await;
    listing.body["books"]
        .as_array()
        .and_then(|books| books.iter().find(|b| b["isbn"] == isbn))
        .and_then(|b| b["id"].as_i64())
        .expect("Added book missing from listing")
}

async fn book(app: &Router, cookie: &str, id: i64) -> Value {
    let response = get(app, &format!("/book/{}", id), Some(cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    response.body["book"].clone()
}

fn titles(body: &Value) -> Vec<String> {
    let mut titles: Vec<String> = body
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|b| b["title"].as_str().map(str::to_string))
        .collect();
    titles.sort();
    titles
}

async fn listing_titles(app: &Router, cookie: &str, query: &str) -> Vec<String> {
    let response = get(app, &format!("/?{}", query), Some(cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    titles(&response.body["books"])
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let response = get(&app, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");

    let response = get(&app, "/ready", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ready");
}

#[tokio::test]
async fn test_unauthenticated_requests_redirect_to_login() {
    let app = test_app().await;

    let response = get(&app, "/", None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
    assert_eq!(response.flash_level(), "warning");

    let response = post_form(&app, "/toggle_status/1", Some("libraryhub_session=garbage"), "").await;
    assert_eq!(response.location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = test_app().await;
    register(&app, "alice", "alice@example.com").await;

    let wrong_password = post_form(&app, "/login", None, "email=alice@example.com&password=nope").await;
    let unknown_email = post_form(&app, "/login", None, "email=bob@example.com&password=secret").await;
    for response in [&wrong_password, &unknown_email] {
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["flash"]["message"], "Invalid email or password.");
        assert!(response.set_cookie.is_none());
    }

    let missing = post_form(&app, "/login", None, "email=alice@example.com").await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let response = post_form(&app, "/login", None, "email=alice@example.com&password=secret").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.message(), "Welcome back, alice!");
    let cookie = session_from(&response);

    let listing = get(&app, "/", Some(&cookie)).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.body["user"]["name"], "alice");

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/login"));
    assert!(response.set_cookie.unwrap_or_default().starts_with("libraryhub_session="));
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = test_app().await;
    let cookie = register(&app, "alice", "alice@example.com").await;
    let token = cookie.trim_start_matches("libraryhub_session=");

    let request = Request::builder()
        .uri("/favorites")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_email_registration_fails() {
    let app = test_app().await;
    register(&app, "alice", "alice@example.com").await;

    let response = post_form(
        &app,
        "/register",
        None,
        "username=impostor&email=alice@example.com&password=other",
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["flash"]["message"], "Email is already registered!");
    assert!(response.set_cookie.is_none());

    // The first account is untouched
    let response = post_form(&app, "/login", None, "email=alice@example.com&password=secret").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.message(), "Welcome back, alice!");
}

#[tokio::test]
async fn test_registration_requires_all_fields() {
    let app = test_app().await;

    let response = post_form(&app, "/register", None, "username=alice&email=&password=secret").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["flash"]["message"], "All fields are required!");
    assert_eq!(response.body["username"], "alice");
}

#[tokio::test]
async fn test_registration_rejects_blank_fields() {
    let app = test_app().await;

    let response = post_form(&app, "/register", None, "username=+++&email=+++&password=pw").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["flash"]["message"], "All fields are required!");
    assert!(response.set_cookie.is_none());

    // Surrounding whitespace is dropped before the account is stored
    let response = post_form(
        &app,
        "/register",
        None,
        "username=+alice+&email=+alice%40example.com+&password=secret",
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    let cookie = session_from(&response);
    assert_eq!(get(&app, "/", Some(&cookie)).await.body["user"]["name"], "alice");

    let response = post_form(&app, "/login", None, "email=+&password=pw").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.set_cookie.is_none());

    let response = post_form(&app, "/login", None, "email=alice%40example.com+&password=secret").await;
    assert_eq!(response.message(), "Welcome back, alice!");
}

#[tokio::test]
async fn test_non_owner_cannot_edit_dune() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let bob = register(&app, "bob", "bob@example.com").await;
    let dune = add_book(&app, &alice, "Dune", "Herbert", "1", "").await;

    let response = post_form(
        &app,
        &format!("/edit-book/{}", dune),
        Some(&bob),
        "title=Hacked&author=Herbert&published_year=1965&isbn=1&format=Physical",
    )
    .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));
    assert_eq!(response.flash_level(), "danger");
    assert_eq!(response.message(), "You are not authorized to edit this book.");

    assert_eq!(book(&app, &alice, dune).await["title"], "Dune");
}

#[tokio::test]
async fn test_non_owner_mutations_leave_book_unchanged() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let bob = register(&app, "bob", "bob@example.com").await;
    let dune = add_book(&app, &alice, "Dune", "Herbert", "1", "SciFi").await;
    post_form(&app, &format!("/edit-notes/{}", dune), Some(&alice), "notes=spice").await;
    let before = book(&app, &alice, dune).await;

    let attempts = [
        (format!("/delete-book/{}", dune), ""),
        (format!("/toggle_status/{}", dune), ""),
        (format!("/edit-notes/{}", dune), "notes=mine+now"),
        (format!("/book/{}", dune), "note=mine+now"),
    ];
    for (path, form) in attempts.iter() {
        let response = post_form(&app, path, Some(&bob), form).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(response.location.as_deref(), Some("/"), "{}", path);
        assert_eq!(response.flash_level(), "danger", "{}", path);
    }

    let response = get(&app, &format!("/edit-book/{}", dune), Some(&bob)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.flash_level(), "danger");

    // Detail stays readable for any logged-in user
    let detail = get(&app, &format!("/book/{}", dune), Some(&bob)).await;
    assert_eq!(detail.body["is_owner"], false);

    assert_eq!(book(&app, &alice, dune).await, before);
    assert!(listing_titles(&app, &bob, "").await.is_empty());
}

#[tokio::test]
async fn test_unknown_book_is_not_found() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;

    assert_eq!(get(&app, "/book/999", Some(&alice)).await.status, StatusCode::NOT_FOUND);
    assert_eq!(post_form(&app, "/delete-book/999", Some(&alice), "").await.status, StatusCode::NOT_FOUND);
    assert_eq!(post_form(&app, "/add_favorite/999", Some(&alice), "").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_filters_compose_conjunctively() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    add_book(&app, &alice, "Dune", "Herbert", "1", "SciFi").await;
    add_book(&app, &alice, "Emma", "Austen", "2", "Classic").await;
    let messiah = add_book(&app, &alice, "Dune+Messiah", "Herbert", "3", "Classic").await;
    post_form(&app, &format!("/add_favorite/{}", messiah), Some(&alice), "").await;

    assert_eq!(listing_titles(&app, &alice, "").await.len(), 3);
    assert_eq!(listing_titles(&app, &alice, "search=dune").await, vec!["Dune", "Dune Messiah"]);
    assert_eq!(listing_titles(&app, &alice, "search=HERB").await, vec!["Dune", "Dune Messiah"]);
    assert_eq!(listing_titles(&app, &alice, "search=dune&category=Classic").await, vec!["Dune Messiah"]);
    assert_eq!(listing_titles(&app, &alice, "category=Classic").await, vec!["Dune Messiah", "Emma"]);
    assert_eq!(listing_titles(&app, &alice, "category=classic").await, Vec::<String>::new());
    assert_eq!(listing_titles(&app, &alice, "favorites_only=1").await, vec!["Dune Messiah"]);
    assert_eq!(listing_titles(&app, &alice, "favorites=on&search=emma").await, Vec::<String>::new());
    assert_eq!(listing_titles(&app, &alice, "favorites=false").await.len(), 3);
    assert_eq!(listing_titles(&app, &alice, "search=%25").await, Vec::<String>::new());
}

#[tokio::test]
async fn test_search_is_case_insensitive_for_non_ascii() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    // "ÉMILE" by "Rousseau"
    add_book(&app, &alice, "%C3%89MILE", "Rousseau", "1", "").await;
    add_book(&app, &alice, "Emma", "Austen", "2", "").await;

    let expected = vec!["ÉMILE"];
    assert_eq!(listing_titles(&app, &alice, "search=%C3%89MILE").await, expected);
    assert_eq!(listing_titles(&app, &alice, "search=%C3%A9mile").await, expected);
    assert_eq!(listing_titles(&app, &alice, "search=MILE").await, expected);
    assert_eq!(listing_titles(&app, &alice, "search=rousSEAU").await, expected);
}

#[tokio::test]
async fn test_featured_book_comes_from_the_listing() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;

    let empty = get(&app, "/", Some(&alice)).await;
    assert!(empty.body["featured_book"].is_null());

    add_book(&app, &alice, "Dune", "Herbert", "1", "SciFi").await;
    add_book(&app, &alice, "Emma", "Austen", "2", "Classic").await;

    let response = get(&app, "/?category=SciFi", Some(&alice)).await;
    assert_eq!(response.body["featured_book"]["title"], "Dune");
}

#[tokio::test]
async fn test_toggle_favorite_is_its_own_inverse() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let dune = add_book(&app, &alice, "Dune", "Herbert", "1", "").await;
    let path = format!("/toggle_favorite/{}", dune);

    let response = post_form(&app, &path, Some(&alice), "").await;
    assert_eq!(response.message(), "Added to Favorites");
    assert_eq!(response.location.as_deref(), Some("/"));
    assert_eq!(titles(&get(&app, "/favorites", Some(&alice)).await.body), vec!["Dune"]);

    let response = post_form(&app, &path, Some(&alice), "").await;
    assert_eq!(response.message(), "Removed from Favorites");
    assert!(titles(&get(&app, "/favorites", Some(&alice)).await.body).is_empty());
}

#[tokio::test]
async fn test_add_and_remove_favorite() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let dune = add_book(&app, &alice, "Dune", "Herbert", "1", "").await;

    let response = post_form(&app, &format!("/add_favorite/{}", dune), Some(&alice), "").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));

    // Adding twice keeps a single entry
    post_form(&app, &format!("/add_favorite/{}", dune), Some(&alice), "").await;
    assert_eq!(titles(&get(&app, "/favorites", Some(&alice)).await.body), vec!["Dune"]);

    let detail = get(&app, &format!("/book/{}", dune), Some(&alice)).await;
    assert_eq!(detail.body["is_favorite"], true);

    let response = post_form(&app, &format!("/remove-favorite/{}", dune), Some(&alice), "").await;
    assert_eq!(response.location.as_deref(), Some("/favorites"));
    assert_eq!(response.message(), "Book removed from your favorites.");
    assert!(titles(&get(&app, "/favorites", Some(&alice)).await.body).is_empty());

    let response = post_form(&app, &format!("/remove-favorite/{}", dune), Some(&alice), "").await;
    assert_eq!(response.flash_level(), "warning");
}

#[tokio::test]
async fn test_favorite_redirects_back_to_referrer() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let dune = add_book(&app, &alice, "Dune", "Herbert", "1", "").await;

    let request = Request::builder()
        .method("POST")
        .uri(format!("/add_favorite/{}", dune))
        .header(header::COOKIE, &alice)
        .header(header::REFERER, format!("http://localhost:5000/book/{}", dune))
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.location, Some(format!("/book/{}", dune)));
}

#[tokio::test]
async fn test_status_toggle_alternates() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    post_form(
        &app,
        "/add-book",
        Some(&alice),
        "title=Dune&author=Herbert&published_year=1965&isbn=1&status=Reading&format=E-book",
    )
    .await;
    let dune = get(&app, "/", Some(&alice)).await.body["books"][0]["id"].as_i64().unwrap();
    assert_eq!(book(&app, &alice, dune).await["status"], "Reading");
    assert_eq!(book(&app, &alice, dune).await["format"], "E-book");

    let path = format!("/toggle_status/{}", dune);
    for expected in ["Read", "Unread", "Read"] {
        let response = post_form(&app, &path, Some(&alice), "").await;
        assert_eq!(response.message(), "Book status updated successfully!");
        assert_eq!(book(&app, &alice, dune).await["status"], expected);
    }
}

#[tokio::test]
async fn test_book_form_errors_return_the_form() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    add_book(&app, &alice, "Dune", "Herbert", "1", "").await;

    let response = post_form(
        &app,
        "/add-book",
        Some(&alice),
        "title=&author=Austen&published_year=1815&isbn=2&format=Physical",
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["form"]["author"], "Austen");
    assert_eq!(response.body["flash"]["level"], "danger");

    let response = post_form(
        &app,
        "/add-book",
        Some(&alice),
        "title=Emma&author=Austen&published_year=1815&isbn=1&format=Physical",
    )
    .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["flash"]["message"], "A book with this ISBN already exists.");
    assert_eq!(listing_titles(&app, &alice, "").await, vec!["Dune"]);

    let page = get(&app, "/add-book", Some(&alice)).await;
    assert_eq!(page.body["statuses"].as_array().map(Vec::len), Some(3));
    assert_eq!(page.body["formats"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_owner_edits_and_deletes_book() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let dune = add_book(&app, &alice, "Dune", "Herbert", "1", "SciFi").await;

    let page = get(&app, &format!("/edit-book/{}", dune), Some(&alice)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["form"]["title"], "Dune");
    assert_eq!(page.body["form"]["published_year"], "1965");

    let response = post_form(
        &app,
        &format!("/edit-book/{}", dune),
        Some(&alice),
        "title=Dune&author=Frank+Herbert&published_year=1965&isbn=1&category=&format=Physical",
    )
    .await;
    assert_eq!(response.message(), "Book updated successfully!");
    let updated = book(&app, &alice, dune).await;
    assert_eq!(updated["author"], "Frank Herbert");
    assert!(updated["category"].is_null());

    post_form(&app, &format!("/add_favorite/{}", dune), Some(&alice), "").await;
    let response = post_form(&app, &format!("/delete-book/{}", dune), Some(&alice), "").await;
    assert_eq!(response.message(), "Book deleted successfully!");
    assert_eq!(get(&app, &format!("/book/{}", dune), Some(&alice)).await.status, StatusCode::NOT_FOUND);
    assert!(titles(&get(&app, "/favorites", Some(&alice)).await.body).is_empty());
}

#[tokio::test]
async fn test_notes_are_overwritten() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let dune = add_book(&app, &alice, "Dune", "Herbert", "1", "").await;

    let response = post_form(&app, &format!("/book/{}", dune), Some(&alice), "note=Great+read").await;
    assert_eq!(response.message(), "Note saved successfully!");
    assert_eq!(book(&app, &alice, dune).await["notes"], "Great read");

    let response = post_form(&app, &format!("/edit-notes/{}", dune), Some(&alice), "notes=Reread").await;
    assert_eq!(response.message(), "Notes updated successfully!");
    assert_eq!(book(&app, &alice, dune).await["notes"], "Reread");

    let response = post_form(&app, &format!("/edit-notes/{}", dune), Some(&alice), "note=a&notes=b").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.message(), "Notes updated successfully!");
    assert_eq!(book(&app, &alice, dune).await["notes"], "b");

    post_form(&app, &format!("/edit-notes/{}", dune), Some(&alice), "").await;
    assert!(book(&app, &alice, dune).await["notes"].is_null());
}

#[tokio::test]
async fn test_borrow_lifecycle() {
    let app = test_app().await;
    let alice = register(&app, "alice", "alice@example.com").await;
    let bob = register(&app, "bob", "bob@example.com").await;
    let carol = register(&app, "carol", "carol@example.com").await;
    let dune = add_book(&app, &alice, "Dune", "Herbert", "1", "").await;

    let response = post_form(&app, &format!("/borrow/{}", dune), Some(&bob), "").await;
    assert_eq!(response.location.as_deref(), Some("/borrows"));
    assert_eq!(response.flash_level(), "success");
    assert_eq!(book(&app, &alice, dune).await["available"], false);

    let response = post_form(&app, &format!("/borrow/{}", dune), Some(&carol), "").await;
    assert_eq!(response.flash_level(), "danger");
    assert_eq!(response.message(), "This book is already borrowed.");

    let borrows = get(&app, "/borrows", Some(&bob)).await.body;
    let borrow_id = borrows[0]["id"].as_i64().unwrap();
    assert_eq!(borrows[0]["title"], "Dune");
    assert_eq!(borrows[0]["returned"], false);
    assert!(borrows[0]["return_date"].is_null());

    let response = post_form(&app, &format!("/return/{}", borrow_id), Some(&carol), "").await;
    assert_eq!(response.location.as_deref(), Some("/"));
    assert_eq!(response.flash_level(), "danger");

    let response = post_form(&app, &format!("/return/{}", borrow_id), Some(&alice), "").await;
    assert_eq!(response.message(), "Book returned successfully!");
    assert_eq!(book(&app, &alice, dune).await["available"], true);

    let response = post_form(&app, &format!("/return/{}", borrow_id), Some(&bob), "").await;
    assert_eq!(response.flash_level(), "danger");

    let borrows = get(&app, "/borrows", Some(&bob)).await.body;
    assert_eq!(borrows[0]["returned"], true);
    assert!(borrows[0]["return_date"].is_string());
}

//! API integration tests
//!
//! Drive the full router in-process on the memory backend.

use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use libris_server::{
    api,
    config::AppConfig,
    models::NewLoan,
    repository::{CirculationStore, MemStorage},
    services::auth::hash_password,
    services::Services,
    AppState,
};

const ADMIN_PASSWORD: &str = "s3cret-admin";

/// Argon2 is slow on purpose; hash the test password once
fn admin_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(ADMIN_PASSWORD).unwrap()).clone()
}

/// Router over a storage the test can also seed directly
fn app_on(storage: Arc<MemStorage>) -> Router {
    let mut config = AppConfig::default();
    config.auth.admin_password_hash = admin_hash();

    let services = Services::new(storage, &config);
    api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

fn app() -> Router {
    app_on(Arc::new(MemStorage::new()))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_book(app: &Router, token: &str, title: &str, author: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/books",
        Some(token),
        Some(json!({
            "title": title,
            "author": author,
            "category": "Fiction",
            "language": "English",
            "price": "12.50",
            "publisher": "Allen & Unwin",
            "ddc": "823.912"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["status"], "available");
    body["id"].as_i64().unwrap()
}

async fn create_member(app: &Router, token: &str, name: &str, registration_no: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/members",
        Some(token),
        Some(json!({ "fullName": name, "class": "10A", "registrationNo": registration_no })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["id"].as_i64().unwrap()
}

async fn circulate(app: &Router, token: &str, book_id: i64, member_id: i64, action: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/circulation",
        Some(token),
        Some(json!({ "bookId": book_id, "memberId": member_id, "action": action })),
    )
    .await
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/api/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn test_login_and_me() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "admin");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = app();
    for uri in ["/api/members", "/api/circulation", "/api/analytics/summary", "/api/book-suggestions"] {
        let (status, _) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let (status, _) = send(&app, Method::GET, "/api/members", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::POST, "/api/books", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_catalog_reads_are_public() {
    let app = app();
    let token = login(&app).await;
    let id = create_book(&app, &token, "The Hobbit", "J.R.R. Tolkien").await;

    let (status, body) = send(&app, Method::GET, "/api/books", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, &format!("/api/books/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "The Hobbit");
    assert_eq!(body["price"], "12.50");
}

#[tokio::test]
async fn test_book_validation_reports_fields() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(&token),
        Some(json!({
            "title": "",
            "author": "Someone",
            "category": "Fiction",
            "language": "English",
            "price": "-1",
            "publisher": "P",
            "ddc": "800"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["title"].is_array());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(&token),
        Some(json!({
            "title": "Ok",
            "author": "Someone",
            "category": "Fiction",
            "language": "English",
            "price": "-1",
            "publisher": "P",
            "ddc": "800"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["price"].is_array());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app();
    let token = login(&app).await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_book_is_not_found() {
    let app = app();
    let token = login(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/books/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");

    let (status, _) = send(&app, Method::PUT, "/api/books/999", Some(&token), Some(json!({ "title": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/books/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_search_is_case_insensitive() {
    let app = app();
    let token = login(&app).await;
    create_book(&app, &token, "The Hobbit", "J.R.R. Tolkien").await;
    create_book(&app, &token, "Dune", "Frank Herbert").await;

    let (status, body) = send(&app, Method::GET, "/api/books/search?q=TOLKIEN", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["title"], "The Hobbit");

    let (status, body) = send(&app, Method::GET, "/api/books/search?q=100%25", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::GET, "/api/books/search", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["q"].is_array());
}

#[tokio::test]
async fn test_duplicate_registration_is_conflict() {
    let app = app();
    let token = login(&app).await;
    create_member(&app, &token, "Ada Lovelace", "R-001").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/members",
        Some(&token),
        Some(json!({ "fullName": "Someone Else", "class": "9B", "registrationNo": "R-001" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_issue_and_return_cycle() {
    let app = app();
    let token = login(&app).await;
    let book = create_book(&app, &token, "The Hobbit", "J.R.R. Tolkien").await;
    let ada = create_member(&app, &token, "Ada Lovelace", "R-001").await;
    let alan = create_member(&app, &token, "Alan Turing", "R-002").await;

    let (status, loan) = circulate(&app, &token, book, ada, "borrow").await;
    assert_eq!(status, StatusCode::CREATED, "{}", loan);
    assert_eq!(loan["action"], "borrow");
    assert_eq!(loan["status"], "active");
    assert!(loan["dueDate"].is_string());

    let (_, body) = send(&app, Method::GET, &format!("/api/books/{}", book), None, None).await;
    assert_eq!(body["status"], "issued");

    // Already out
    let (status, _) = circulate(&app, &token, book, alan, "borrow").await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Book on loan cannot be deleted
    let (status, _) = send(&app, Method::DELETE, &format!("/api/books/{}", book), Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Wrong borrower
    let (status, _) = circulate(&app, &token, book, alan, "return").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, record) = circulate(&app, &token, book, ada, "return").await;
    assert_eq!(status, StatusCode::CREATED, "{}", record);
    assert_eq!(record["action"], "return");
    assert_eq!(record["status"], "returned");

    let (_, body) = send(&app, Method::GET, &format!("/api/books/{}", book), None, None).await;
    assert_eq!(body["status"], "available");

    // Nothing left to return
    let (status, _) = circulate(&app, &token, book, ada, "return").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::GET, "/api/circulation/active", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, body) = send(&app, Method::GET, &format!("/api/members/{}/circulation", ada), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["action"], "return");
    assert_eq!(history[1]["status"], "returned");
}

#[tokio::test]
async fn test_borrow_requires_member() {
    let app = app();
    let token = login(&app).await;
    let book = create_book(&app, &token, "Dune", "Frank Herbert").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/circulation",
        Some(&token),
        Some(json!({ "bookId": book, "action": "borrow" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["memberId"].is_array());

    let (status, _) = circulate(&app, &token, book, 999, "borrow").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_past_due_loans_are_overdue() {
    let storage = Arc::new(MemStorage::new());
    let app = app_on(storage.clone());
    let token = login(&app).await;
    let book = create_book(&app, &token, "Dune", "Frank Herbert").await;
    let member = create_member(&app, &token, "Ada Lovelace", "R-001").await;

    // Issued fifteen days ago, due yesterday
    let now = Utc::now();
    storage
        .issue_book(&NewLoan {
            book_id: book as i32,
            member_id: member as i32,
            date: now - Duration::days(15),
            due_date: now - Duration::days(1),
        })
        .await
        .unwrap();

    let (_, body) = send(&app, Method::GET, &format!("/api/books/{}", book), None, None).await;
    assert_eq!(body["status"], "issued");

    let (status, body) = send(&app, Method::GET, "/api/circulation/overdue", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let overdue = body.as_array().unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0]["status"], "overdue");

    let (_, body) = send(&app, Method::GET, "/api/analytics/issued-books", Some(&token), None).await;
    assert_eq!(body[0]["isOverdue"], true);

    let (_, body) = send(&app, Method::GET, "/api/analytics/summary", Some(&token), None).await;
    assert_eq!(body["overdueLoans"], 1);
    assert_eq!(body["activeLoans"], 1);

    // Returning an overdue loan still works
    let (status, _) = circulate(&app, &token, book, member, "return").await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_analytics_rankings() {
    let app = app();
    let token = login(&app).await;
    let hobbit = create_book(&app, &token, "The Hobbit", "J.R.R. Tolkien").await;
    let dune = create_book(&app, &token, "Dune", "Frank Herbert").await;
    let ada = create_member(&app, &token, "Ada Lovelace", "R-001").await;
    let alan = create_member(&app, &token, "Alan Turing", "R-002").await;

    for member in [ada, alan, ada] {
        assert_eq!(circulate(&app, &token, dune, member, "borrow").await.0, StatusCode::CREATED);
        assert_eq!(circulate(&app, &token, dune, member, "return").await.0, StatusCode::CREATED);
    }
    assert_eq!(circulate(&app, &token, hobbit, ada, "borrow").await.0, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, "/api/analytics/most-read-books", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["book"]["id"].as_i64(), Some(dune));
    assert_eq!(body[0]["borrowCount"], 3);
    assert_eq!(body[1]["borrowCount"], 1);

    let (_, body) = send(&app, Method::GET, "/api/analytics/most-active-readers", Some(&token), None).await;
    assert_eq!(body[0]["member"]["id"].as_i64(), Some(ada));
    assert_eq!(body[0]["borrowCount"], 3);

    let (_, body) = send(&app, Method::GET, "/api/analytics/issued-books", Some(&token), None).await;
    let issued = body.as_array().unwrap();
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0]["book"]["id"].as_i64(), Some(hobbit));
    assert_eq!(issued[0]["isOverdue"], false);

    let (_, body) = send(&app, Method::GET, "/api/analytics/summary", Some(&token), None).await;
    assert_eq!(body["totalBooks"], 2);
    assert_eq!(body["issuedBooks"], 1);
    assert_eq!(body["availableBooks"], 1);
    assert_eq!(body["totalMembers"], 2);
}

#[tokio::test]
async fn test_reviews_and_suggestions() {
    let app = app();
    let token = login(&app).await;
    let book = create_book(&app, &token, "Dune", "Frank Herbert").await;
    let member = create_member(&app, &token, "Ada Lovelace", "R-001").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/book-reviews",
        None,
        Some(json!({ "bookId": book, "memberId": member, "rating": 6, "review": "Too good" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/book-reviews",
        None,
        Some(json!({ "bookId": book, "memberId": member, "rating": 5, "review": "Spice!" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, &format!("/api/book-reviews/book/{}", book), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["rating"], 5);

    let (status, _) = send(&app, Method::GET, "/api/book-reviews/book/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, suggestion) = send(
        &app,
        Method::POST,
        "/api/book-suggestions",
        None,
        Some(json!({ "memberId": member, "bookTitle": "Neuromancer", "author": "William Gibson" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(suggestion["status"], "pending");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/book-suggestions/{}", suggestion["id"]),
        Some(&token),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
}

#[tokio::test]
async fn test_get_review_by_id() {
    let app = app();
    let token = login(&app).await;
    let book = create_book(&app, &token, "Dune", "Frank Herbert").await;
    let member = create_member(&app, &token, "Ada Lovelace", "R-001").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/book-reviews",
        None,
        Some(json!({ "bookId": book, "memberId": member, "rating": 4, "review": "Long but worth it" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, &format!("/api/book-reviews/{}", created["id"]), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 4);
    assert_eq!(body["bookId"].as_i64(), Some(book));

    let (status, body) = send(&app, Method::GET, "/api/book-reviews/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchData");
}

#[tokio::test]
async fn test_suggestion_is_decided_once() {
    let app = app();
    let token = login(&app).await;
    let member = create_member(&app, &token, "Ada Lovelace", "R-001").await;

    let (status, suggestion) = send(
        &app,
        Method::POST,
        "/api/book-suggestions",
        None,
        Some(json!({ "memberId": member, "bookTitle": "Neuromancer", "author": "William Gibson" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/book-suggestions/{}", suggestion["id"]);

    // Reading a suggestion is an admin operation
    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["bookTitle"], "Neuromancer");
    assert_eq!(body["status"], "pending");

    let (status, body) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "pending" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["status"].is_array());

    let (status, _) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "rejected" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "status": "approved" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(body["status"], "rejected");

    let (status, _) = send(&app, Method::GET, "/api/book-suggestions/999", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/book-suggestions/999",
        Some(&token),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_member_search() {
    let app = app();
    let token = login(&app).await;
    create_member(&app, &token, "Alice Smith", "R-001").await;
    create_member(&app, &token, "Bob Stone", "R-002").await;
    create_member(&app, &token, "Malik Ali", "R-003").await;

    let (status, _) = send(&app, Method::GET, "/api/members/search?q=Ali", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, Method::GET, "/api/members/search?q=Ali", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["fullName"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, ["Alice Smith", "Malik Ali"]);

    let (_, body) = send(&app, Method::GET, "/api/members/search?q=r-002", Some(&token), None).await;
    assert_eq!(body[0]["fullName"], "Bob Stone");

    let (status, body) = send(&app, Method::GET, "/api/members/search?q=", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["q"].is_array());
}

#[tokio::test]
async fn test_delete_member_removes_history() {
    let app = app();
    let token = login(&app).await;
    let book = create_book(&app, &token, "Dune", "Frank Herbert").await;
    let member = create_member(&app, &token, "Ada Lovelace", "R-001").await;
    let other = create_member(&app, &token, "Alan Turing", "R-002").await;

    assert_eq!(circulate(&app, &token, book, member, "borrow").await.0, StatusCode::CREATED);
    for (who, text) in [(member, "Spice!"), (other, "Sand everywhere")] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/book-reviews",
            None,
            Some(json!({ "bookId": book, "memberId": who, "rating": 5, "review": text })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/book-suggestions",
        None,
        Some(json!({ "memberId": member, "bookTitle": "Neuromancer", "author": "William Gibson" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let member_uri = format!("/api/members/{}", member);

    // Still holding the book
    let (status, _) = send(&app, Method::DELETE, &member_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(circulate(&app, &token, book, member, "return").await.0, StatusCode::CREATED);
    let (status, _) = send(&app, Method::DELETE, &member_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &member_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/circulation", Some(&token), None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send(&app, Method::GET, &format!("/api/book-reviews/book/{}", book), None, None).await;
    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["memberId"].as_i64(), Some(other));

    let (_, body) = send(&app, Method::GET, "/api/book-suggestions", Some(&token), None).await;
    assert!(body.as_array().unwrap().is_empty());

    // The book itself stays in the catalog
    let (_, body) = send(&app, Method::GET, &format!("/api/books/{}", book), None, None).await;
    assert_eq!(body["status"], "available");
}

#[tokio::test]
async fn test_price_beyond_two_decimals_is_rejected() {
    let app = app();
    let token = login(&app).await;
    let id = create_book(&app, &token, "Dune", "Frank Herbert").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id),
        Some(&token),
        Some(json!({ "price": "1.999" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["price"].is_array());

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id),
        Some(&token),
        Some(json!({ "price": "100000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["fields"]["price"].is_array());
}

#[tokio::test]
async fn test_category_crud() {
    let app = app();
    let token = login(&app).await;

    let (status, created) = send(&app, Method::POST, "/api/categories", Some(&token), Some(json!({ "name": "Poetry" }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, Method::POST, "/api/categories", Some(&token), Some(json!({ "name": "Poetry" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = format!("/api/categories/{}", created["id"]);
    let (status, body) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "name": "Verse" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Verse");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/book-reviews/{id}"]["get"].is_object());
    assert!(body["paths"]["/book-suggestions/{id}"]["get"].is_object());
}

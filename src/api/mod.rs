//! API handlers for the Libris REST endpoints

pub mod analytics;
pub mod auth;
pub mod books;
pub mod categories;
pub mod circulation;
pub mod health;
pub mod members;
pub mod openapi;
pub mod reviews;
pub mod suggestions;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    routing::{get, post},
    Json, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::de::DeserializeOwned;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use validator::Validate;

use crate::{error::AppError, models::AdminClaims, AppState};

/// Extractor for the authenticated admin, from the bearer token
pub struct AdminUser(pub AdminClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::Authentication("Missing or malformed bearer token".to_string()))?;

        let claims = state.services.auth.verify_token(bearer.token())?;
        Ok(AdminUser(claims))
    }
}

/// JSON body that has passed its `validator` rules
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/search", get(books::search_books))
        .route(
            "/books/:id",
            get(books::get_book).put(books::update_book).delete(books::delete_book),
        )
        // Members
        .route("/members", get(members::list_members).post(members::create_member))
        .route("/members/search", get(members::search_members))
        .route(
            "/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route("/members/:id/circulation", get(members::member_circulation))
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Suggestions
        .route(
            "/book-suggestions",
            get(suggestions::list_suggestions).post(suggestions::create_suggestion),
        )
        .route(
            "/book-suggestions/:id",
            get(suggestions::get_suggestion).put(suggestions::update_suggestion_status),
        )
        // Reviews
        .route("/book-reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route("/book-reviews/:id", get(reviews::get_review))
        .route("/book-reviews/book/:book_id", get(reviews::book_reviews))
        // Circulation
        .route(
            "/circulation",
            get(circulation::list_circulation).post(circulation::record_circulation),
        )
        .route("/circulation/active", get(circulation::active_loans))
        .route("/circulation/overdue", get(circulation::overdue_loans))
        // Analytics
        .route("/analytics/most-read-books", get(analytics::most_read_books))
        .route("/analytics/most-active-readers", get(analytics::most_active_readers))
        .route("/analytics/issued-books", get(analytics::issued_books))
        .route("/analytics/summary", get(analytics::summary))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

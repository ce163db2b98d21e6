//! Book review endpoints (public)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{BookReview, CreateReview},
    AppState,
};

use super::ValidatedJson;

#[utoipa::path(
    get,
    path = "/book-reviews",
    tag = "reviews",
    responses(
        (status = 200, description = "All reviews in submission order", body = Vec<BookReview>)
    )
)]
pub async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<Vec<BookReview>>> {
    Ok(Json(state.services.reviews.list().await?))
}

#[utoipa::path(
    get,
    path = "/book-reviews/{id}",
    tag = "reviews",
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review", body = BookReview),
        (status = 404, description = "Review not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_review(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<BookReview>> {
    Ok(Json(state.services.reviews.get(id).await?))
}

#[utoipa::path(
    get,
    path = "/book-reviews/book/{book_id}",
    tag = "reviews",
    params(
        ("book_id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Reviews of the book", body = Vec<BookReview>),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn book_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<i32>,
) -> AppResult<Json<Vec<BookReview>>> {
    Ok(Json(state.services.reviews.for_book(book_id).await?))
}

#[utoipa::path(
    post,
    path = "/book-reviews",
    tag = "reviews",
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review recorded", body = BookReview),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book or member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateReview>,
) -> AppResult<(StatusCode, Json<BookReview>)> {
    let created = state.services.reviews.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

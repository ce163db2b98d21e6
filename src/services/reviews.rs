//! Book review service

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{BookReview, CreateReview},
    repository::{BookStore, ReviewStore},
};

#[derive(Clone)]
pub struct ReviewsService {
    reviews: Arc<dyn ReviewStore>,
    books: Arc<dyn BookStore>,
}

impl ReviewsService {
    pub fn new(reviews: Arc<dyn ReviewStore>, books: Arc<dyn BookStore>) -> Self {
        Self { reviews, books }
    }

    pub async fn list(&self) -> AppResult<Vec<BookReview>> {
        self.reviews.list_reviews().await
    }

    pub async fn get(&self, id: i32) -> AppResult<BookReview> {
        self.reviews
            .get_review(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))
    }

    pub async fn for_book(&self, book_id: i32) -> AppResult<Vec<BookReview>> {
        if self.books.get_book(book_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Book with id {} not found", book_id)));
        }
        self.reviews.reviews_for_book(book_id).await
    }

    pub async fn create(&self, data: &CreateReview) -> AppResult<BookReview> {
        self.reviews.create_review(data).await
    }
}

//! Book reviews table

use async_trait::async_trait;

use super::{constraint_error, PgStorage};
use crate::{
    error::AppResult,
    models::{BookReview, CreateReview},
    repository::ReviewStore,
};

#[async_trait]
impl ReviewStore for PgStorage {
    async fn list_reviews(&self) -> AppResult<Vec<BookReview>> {
        let rows = sqlx::query_as::<_, BookReview>("SELECT * FROM book_reviews ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_review(&self, id: i32) -> AppResult<Option<BookReview>> {
        let row = sqlx::query_as::<_, BookReview>("SELECT * FROM book_reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn reviews_for_book(&self, book_id: i32) -> AppResult<Vec<BookReview>> {
        let rows = sqlx::query_as::<_, BookReview>(
            "SELECT * FROM book_reviews WHERE book_id = $1 ORDER BY id",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_review(&self, data: &CreateReview) -> AppResult<BookReview> {
        sqlx::query_as::<_, BookReview>(
            r#"
            INSERT INTO book_reviews (book_id, member_id, rating, review)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(data.book_id)
        .bind(data.member_id)
        .bind(data.rating)
        .bind(&data.review)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            constraint_error(e, String::new, || {
                format!("Book {} or member {} not found", data.book_id, data.member_id)
            })
        })
    }
}

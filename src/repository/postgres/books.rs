//! Books table

use async_trait::async_trait;

use super::{like_pattern, PgStorage};
use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, UpdateBook},
    repository::BookStore,
};

#[async_trait]
impl BookStore for PgStorage {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn get_book(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, category, language, price, publisher, ddc, cover_image, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'available')
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.category)
        .bind(&data.language)
        .bind(data.price)
        .bind(&data.publisher)
        .bind(&data.ddc)
        .bind(&data.cover_image)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn update_book(&self, id: i32, data: &UpdateBook) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                category = COALESCE($4, category),
                language = COALESCE($5, language),
                price = COALESCE($6, price),
                publisher = COALESCE($7, publisher),
                ddc = COALESCE($8, ddc),
                cover_image = COALESCE($9, cover_image)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(&data.author)
        .bind(&data.category)
        .bind(&data.language)
        .bind(data.price)
        .bind(&data.publisher)
        .bind(&data.ddc)
        .bind(&data.cover_image)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn delete_book(&self, id: i32) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let found: Option<i32> = sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Ok(false);
        }

        let on_loan: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM circulation WHERE book_id = $1 AND status = 'active')",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if on_loan {
            return Err(AppError::Conflict(format!("Book {} is currently issued", id)));
        }

        // reviews and circulation history go with it (ON DELETE CASCADE)
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn search_books(&self, term: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books
            WHERE title ILIKE $1 OR author ILIKE $1 OR category ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }
}

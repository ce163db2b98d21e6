//! Book suggestions table

use async_trait::async_trait;

use super::{constraint_error, PgStorage};
use crate::{
    error::{AppError, AppResult},
    models::{BookSuggestion, CreateSuggestion, SuggestionStatus},
    repository::SuggestionStore,
};

#[async_trait]
impl SuggestionStore for PgStorage {
    async fn list_suggestions(&self) -> AppResult<Vec<BookSuggestion>> {
        let rows = sqlx::query_as::<_, BookSuggestion>("SELECT * FROM book_suggestions ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_suggestion(&self, id: i32) -> AppResult<Option<BookSuggestion>> {
        let row = sqlx::query_as::<_, BookSuggestion>("SELECT * FROM book_suggestions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create_suggestion(&self, data: &CreateSuggestion) -> AppResult<BookSuggestion> {
        sqlx::query_as::<_, BookSuggestion>(
            r#"
            INSERT INTO book_suggestions (member_id, book_title, author, reason, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *
            "#,
        )
        .bind(data.member_id)
        .bind(&data.book_title)
        .bind(&data.author)
        .bind(&data.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            constraint_error(e, String::new, || format!("Member {} not found", data.member_id))
        })
    }

    async fn set_suggestion_status(
        &self,
        id: i32,
        status: SuggestionStatus,
    ) -> AppResult<Option<BookSuggestion>> {
        let row = sqlx::query_as::<_, BookSuggestion>(
            "UPDATE book_suggestions SET status = $2 WHERE id = $1 AND status = 'pending' RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        if row.is_some() {
            return Ok(row);
        }

        // Nothing updated: either unknown or already decided
        match self.get_suggestion(id).await? {
            Some(existing) => Err(AppError::Conflict(format!(
                "Suggestion {} was already {}",
                id, existing.status
            ))),
            None => Ok(None),
        }
    }
}

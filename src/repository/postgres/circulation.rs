//! Circulation log and the borrow/return transactions

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{constraint_error, PgStorage};
use crate::{
    error::{AppError, AppResult},
    models::{BookStatus, Circulation, NewLoan, ReturnedLoan},
    repository::CirculationStore,
};

#[async_trait]
impl CirculationStore for PgStorage {
    async fn list_circulation(&self) -> AppResult<Vec<Circulation>> {
        let rows = sqlx::query_as::<_, Circulation>("SELECT * FROM circulation ORDER BY date DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn active_loans(&self) -> AppResult<Vec<Circulation>> {
        let rows = sqlx::query_as::<_, Circulation>(
            "SELECT * FROM circulation WHERE status = 'active' ORDER BY due_date NULLS LAST, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn overdue_loans(&self, now: DateTime<Utc>) -> AppResult<Vec<Circulation>> {
        let rows = sqlx::query_as::<_, Circulation>(
            r#"
            SELECT * FROM circulation
            WHERE status = 'active' AND due_date < $1
            ORDER BY due_date, id
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn member_history(&self, member_id: i32) -> AppResult<Vec<Circulation>> {
        let rows = sqlx::query_as::<_, Circulation>(
            "SELECT * FROM circulation WHERE member_id = $1 ORDER BY date DESC, id DESC",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn issue_book(&self, loan: &NewLoan) -> AppResult<Circulation> {
        let mut tx = self.pool.begin().await?;

        let status: BookStatus =
            sqlx::query_scalar::<_, BookStatus>("SELECT status FROM books WHERE id = $1 FOR UPDATE")
                .bind(loan.book_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Book {} not found", loan.book_id)))?;

        let member_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
            .bind(loan.member_id)
            .fetch_one(&mut *tx)
            .await?;
        if !member_exists {
            return Err(AppError::NotFound(format!("Member {} not found", loan.member_id)));
        }

        if status != BookStatus::Available {
            return Err(AppError::Conflict(format!(
                "Book {} is not available ({})",
                loan.book_id, status
            )));
        }

        let record = sqlx::query_as::<_, Circulation>(
            r#"
            INSERT INTO circulation (book_id, member_id, action, date, due_date, status)
            VALUES ($1, $2, 'borrow', $3, $4, 'active')
            RETURNING *
            "#,
        )
        .bind(loan.book_id)
        .bind(loan.member_id)
        .bind(loan.date)
        .bind(loan.due_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            constraint_error(
                e,
                || format!("Book {} is already on loan", loan.book_id),
                || format!("Book {} or member {} not found", loan.book_id, loan.member_id),
            )
        })?;

        sqlx::query("UPDATE books SET status = 'issued' WHERE id = $1")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(record)
    }

    async fn return_book(
        &self,
        book_id: i32,
        borrower: Option<i32>,
        returned_at: DateTime<Utc>,
    ) -> AppResult<ReturnedLoan> {
        let mut tx = self.pool.begin().await?;

        let found: Option<i32> = sqlx::query_scalar("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Err(AppError::NotFound(format!("Book {} not found", book_id)));
        }

        let open = sqlx::query_as::<_, Circulation>(
            r#"
            SELECT * FROM circulation
            WHERE book_id = $1 AND status = 'active'
            ORDER BY id DESC
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} has no active loan", book_id)))?;

        if let Some(member_id) = borrower.filter(|m| *m != open.member_id) {
            return Err(AppError::Conflict(format!(
                "Book {} is on loan to member {}, not {}",
                book_id, open.member_id, member_id
            )));
        }

        let loan = sqlx::query_as::<_, Circulation>(
            "UPDATE circulation SET status = 'returned', return_date = $2 WHERE id = $1 RETURNING *",
        )
        .bind(open.id)
        .bind(returned_at)
        .fetch_one(&mut *tx)
        .await?;

        let record = sqlx::query_as::<_, Circulation>(
            r#"
            INSERT INTO circulation (book_id, member_id, action, date, return_date, status)
            VALUES ($1, $2, 'return', $3, $3, 'returned')
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(loan.member_id)
        .bind(returned_at)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE books SET status = 'available' WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ReturnedLoan { loan, record })
    }
}

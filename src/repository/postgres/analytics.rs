//! Aggregations over the circulation log

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, FromRow, Row};

use super::PgStorage;
use crate::{
    error::AppResult,
    models::{Book, BookReadCount, IssuedBook, LibrarySummary, Member, ReaderActivity},
    repository::AnalyticsStore,
};

fn issued_book_from_row(row: &PgRow, now: DateTime<Utc>) -> Result<IssuedBook, sqlx::Error> {
    let due_date: Option<DateTime<Utc>> = row.try_get("due_date")?;
    Ok(IssuedBook {
        circulation_id: row.try_get("circulation_id")?,
        book: Book {
            id: row.try_get("book_id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            category: row.try_get("category")?,
            language: row.try_get("language")?,
            price: row.try_get("price")?,
            publisher: row.try_get("publisher")?,
            ddc: row.try_get("ddc")?,
            cover_image: row.try_get("cover_image")?,
            status: row.try_get("book_status")?,
            created_at: row.try_get("book_created_at")?,
        },
        member: Member {
            id: row.try_get("member_id")?,
            full_name: row.try_get("full_name")?,
            class: row.try_get("class_name")?,
            registration_no: row.try_get("registration_no")?,
            created_at: row.try_get("member_created_at")?,
        },
        borrowed_at: row.try_get("borrowed_at")?,
        due_date,
        is_overdue: due_date.map(|d| d < now).unwrap_or(false),
    })
}

#[async_trait]
impl AnalyticsStore for PgStorage {
    async fn most_read_books(&self) -> AppResult<Vec<BookReadCount>> {
        let rows = sqlx::query(
            r#"
            SELECT b.*, COUNT(c.id) AS borrow_count
            FROM circulation c
            JOIN books b ON b.id = c.book_id
            WHERE c.action = 'borrow'
            GROUP BY b.id
            ORDER BY borrow_count DESC, b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            result.push(BookReadCount {
                book: Book::from_row(&row)?,
                borrow_count: row.try_get("borrow_count")?,
            });
        }
        Ok(result)
    }

    async fn most_active_readers(&self) -> AppResult<Vec<ReaderActivity>> {
        let rows = sqlx::query(
            r#"
            SELECT m.*, COUNT(c.id) AS borrow_count
            FROM circulation c
            JOIN members m ON m.id = c.member_id
            WHERE c.action = 'borrow'
            GROUP BY m.id
            ORDER BY borrow_count DESC, m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            result.push(ReaderActivity {
                member: Member::from_row(&row)?,
                borrow_count: row.try_get("borrow_count")?,
            });
        }
        Ok(result)
    }

    async fn issued_books(&self, now: DateTime<Utc>) -> AppResult<Vec<IssuedBook>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id AS circulation_id, c.date AS borrowed_at, c.due_date,
                   b.id AS book_id, b.title, b.author, b.category, b.language, b.price,
                   b.publisher, b.ddc, b.cover_image, b.status AS book_status,
                   b.created_at AS book_created_at,
                   m.id AS member_id, m.full_name, m.class_name, m.registration_no,
                   m.created_at AS member_created_at
            FROM circulation c
            JOIN books b ON b.id = c.book_id
            JOIN members m ON m.id = c.member_id
            WHERE c.status = 'active'
            ORDER BY c.due_date NULLS LAST, c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            result.push(issued_book_from_row(row, now)?);
        }
        Ok(result)
    }

    async fn summary(&self, now: DateTime<Utc>) -> AppResult<LibrarySummary> {
        let summary = sqlx::query_as::<_, LibrarySummary>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM books) AS total_books,
                (SELECT COUNT(*) FROM books WHERE status = 'available') AS available_books,
                (SELECT COUNT(*) FROM books WHERE status = 'issued') AS issued_books,
                (SELECT COUNT(*) FROM members) AS total_members,
                (SELECT COUNT(*) FROM categories) AS total_categories,
                (SELECT COUNT(*) FROM circulation WHERE status = 'active') AS active_loans,
                (SELECT COUNT(*) FROM circulation WHERE status = 'active' AND due_date < $1) AS overdue_loans,
                (SELECT COUNT(*) FROM book_suggestions WHERE status = 'pending') AS pending_suggestions
            "#,
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }
}

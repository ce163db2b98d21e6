//! Derived views over the circulation log

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{book::Book, member::Member};

/// A book with the number of times it was borrowed
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookReadCount {
    pub book: Book,
    pub borrow_count: i64,
}

/// A member with the number of books they borrowed
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReaderActivity {
    pub member: Member,
    pub borrow_count: i64,
}

/// An open loan with its book and borrower
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuedBook {
    pub circulation_id: i32,
    pub book: Book,
    pub member: Member,
    pub borrowed_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_overdue: bool,
}

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySummary {
    pub total_books: i64,
    pub available_books: i64,
    pub issued_books: i64,
    pub total_members: i64,
    pub total_categories: i64,
    pub active_loans: i64,
    pub overdue_loans: i64,
    pub pending_suggestions: i64,
}

//! Circulation (borrow / return log) model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{CirculationAction, CirculationStatus};

/// One borrow or return event linking a book and a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Circulation {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub action: CirculationAction,
    pub date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: CirculationStatus,
}

impl Circulation {
    /// An active loan whose due date has passed
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == CirculationStatus::Active && self.due_date.map(|d| d < now).unwrap_or(false)
    }

    /// The status as seen by readers: active loans past due read as overdue
    pub fn with_effective_status(mut self, now: DateTime<Utc>) -> Self {
        if self.is_overdue(now) {
            self.status = CirculationStatus::Overdue;
        }
        self
    }
}

/// Request body for POST /circulation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CirculationRequest {
    pub book_id: i32,
    /// Required for a borrow; checked against the open loan for a return
    pub member_id: Option<i32>,
    pub action: CirculationAction,
}

/// Loan to be opened by the store, with dates fixed by the caller
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub book_id: i32,
    pub member_id: i32,
    pub date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl NewLoan {
    pub fn starting_at(book_id: i32, member_id: i32, date: DateTime<Utc>, loan_period_days: i64) -> Self {
        Self {
            book_id,
            member_id,
            date,
            due_date: date + Duration::days(loan_period_days),
        }
    }
}

/// Outcome of returning a book
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReturnedLoan {
    /// The borrow record, now closed
    pub loan: Circulation,
    /// The return event appended to the log
    pub record: Circulation,
}

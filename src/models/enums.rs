//! Shared domain enums (stored as Postgres enum types)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// BookStatus
// ---------------------------------------------------------------------------

/// Shelf status of a book; only circulation actions move it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "book_status", rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Issued,
    Reserved,
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Available => "available",
            BookStatus::Issued => "issued",
            BookStatus::Reserved => "reserved",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// SuggestionStatus
// ---------------------------------------------------------------------------

/// Review state of a member's purchase suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "suggestion_status", rename_all = "lowercase")]
pub enum SuggestionStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for SuggestionStatus {
    fn default() -> Self {
        SuggestionStatus::Pending
    }
}

impl std::fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Approved => "approved",
            SuggestionStatus::Rejected => "rejected",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// CirculationAction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "circulation_action", rename_all = "lowercase")]
pub enum CirculationAction {
    Borrow,
    Return,
}

// ---------------------------------------------------------------------------
// CirculationStatus
// ---------------------------------------------------------------------------

/// Loan state. `Overdue` is never persisted: it is derived on read from
/// `Active` plus a due date in the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "circulation_status", rename_all = "lowercase")]
pub enum CirculationStatus {
    Active,
    Returned,
    Overdue,
}

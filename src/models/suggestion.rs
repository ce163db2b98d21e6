//! Book purchase suggestions submitted by members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::SuggestionStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookSuggestion {
    pub id: i32,
    pub member_id: i32,
    pub book_title: String,
    pub author: String,
    pub reason: Option<String>,
    pub status: SuggestionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuggestion {
    pub member_id: i32,
    #[validate(length(min = 1, max = 255, message = "Book title is required"))]
    pub book_title: String,
    #[validate(length(min = 1, max = 255, message = "Author is required"))]
    pub author: String,
    #[validate(length(max = 2000, message = "Reason is too long"))]
    pub reason: Option<String>,
}

/// Admin decision on a suggestion
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateSuggestionStatus {
    pub status: SuggestionStatus,
}

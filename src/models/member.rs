//! Library member model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Member (student) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i32,
    pub full_name: String,
    /// School class, e.g. "10-B"
    #[sqlx(rename = "class_name")]
    pub class: String,
    /// Unique registration number
    pub registration_no: String,
    pub created_at: DateTime<Utc>,
}

/// Create member request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMember {
    #[validate(length(min = 1, max = 255, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, max = 50, message = "Class is required"))]
    pub class: String,
    #[validate(length(min = 1, max = 50, message = "Registration number is required"))]
    pub registration_no: String,
}

/// Update member request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMember {
    #[validate(length(min = 1, max = 255, message = "Full name cannot be empty"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Class cannot be empty"))]
    pub class: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Registration number cannot be empty"))]
    pub registration_no: Option<String>,
}

impl Member {
    pub fn apply(&mut self, patch: &UpdateMember) {
        if let Some(ref v) = patch.full_name {
            self.full_name = v.clone();
        }
        if let Some(ref v) = patch.class {
            self.class = v.clone();
        }
        if let Some(ref v) = patch.registration_no {
            self.registration_no = v.clone();
        }
    }

    /// Case-insensitive substring match over name, class and registration
    /// number. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.full_name, &self.class, &self.registration_no]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

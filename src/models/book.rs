//! Book (catalog entry) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use super::enums::BookStatus;

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    /// Category name (free text, matches a `Category.name` by convention)
    pub category: String,
    pub language: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub publisher: String,
    /// Dewey Decimal Classification code
    pub ddc: String,
    pub cover_image: Option<String>,
    pub status: BookStatus,
    pub created_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,
    #[validate(length(min = 1, max = 50, message = "Language is required"))]
    pub language: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    #[validate(length(min = 1, max = 255, message = "Publisher is required"))]
    pub publisher: String,
    #[validate(length(min = 1, max = 32, message = "DDC code is required"))]
    pub ddc: String,
    pub cover_image: Option<String>,
}

/// Update book request. Status is not part of it: only circulation moves it.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Author cannot be empty"))]
    pub author: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category cannot be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Language cannot be empty"))]
    pub language: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[validate(length(min = 1, max = 255, message = "Publisher cannot be empty"))]
    pub publisher: Option<String>,
    #[validate(length(min = 1, max = 32, message = "DDC code cannot be empty"))]
    pub ddc: Option<String>,
    pub cover_image: Option<String>,
}

/// Search query parameters (shared by book and member search)
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring
    pub q: Option<String>,
}

impl SearchQuery {
    /// The trimmed search term, rejecting a missing or blank one
    pub fn term(&self) -> Result<&str, ValidationErrors> {
        match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => Ok(q),
            _ => {
                let mut errors = ValidationErrors::new();
                let mut error = ValidationError::new("required");
                error.message = Some("Search query is required".into());
                errors.add("q", error);
                Err(errors)
            }
        }
    }
}

/// Prices are stored as NUMERIC(10, 2)
fn check_price(price: Option<&Decimal>) -> Result<(), ValidationErrors> {
    let max_price = Decimal::new(100_000_000, 0);
    let message = match price {
        Some(p) if *p < Decimal::ZERO => "Price cannot be negative",
        Some(p) if *p >= max_price => "Price must be below 100000000",
        Some(p) if p.scale() > 2 => "Price cannot have more than two decimal places",
        _ => return Ok(()),
    };
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("range");
    error.message = Some(message.into());
    errors.add("price", error);
    Err(errors)
}

impl CreateBook {
    /// Derive-level rules plus the price bound
    pub fn check(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        check_price(Some(&self.price))
    }
}

impl UpdateBook {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        check_price(self.price.as_ref())
    }
}

impl Book {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &UpdateBook) {
        if let Some(ref v) = patch.title {
            self.title = v.clone();
        }
        if let Some(ref v) = patch.author {
            self.author = v.clone();
        }
        if let Some(ref v) = patch.category {
            self.category = v.clone();
        }
        if let Some(ref v) = patch.language {
            self.language = v.clone();
        }
        if let Some(v) = patch.price {
            self.price = v;
        }
        if let Some(ref v) = patch.publisher {
            self.publisher = v.clone();
        }
        if let Some(ref v) = patch.ddc {
            self.ddc = v.clone();
        }
        if patch.cover_image.is_some() {
            self.cover_image = patch.cover_image.clone();
        }
    }

    /// Case-insensitive substring match over title, author and category.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.title, &self.author, &self.category]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

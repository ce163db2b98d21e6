//! Book suggestion service

use std::sync::Arc;

use validator::{ValidationError, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::{BookSuggestion, CreateSuggestion, SuggestionStatus},
    repository::SuggestionStore,
};

fn suggestion_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Suggestion with id {} not found", id))
}

#[derive(Clone)]
pub struct SuggestionsService {
    store: Arc<dyn SuggestionStore>,
}

impl SuggestionsService {
    pub fn new(store: Arc<dyn SuggestionStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<BookSuggestion>> {
        self.store.list_suggestions().await
    }

    pub async fn get(&self, id: i32) -> AppResult<BookSuggestion> {
        self.store
            .get_suggestion(id)
            .await?
            .ok_or_else(|| suggestion_not_found(id))
    }

    pub async fn create(&self, data: &CreateSuggestion) -> AppResult<BookSuggestion> {
        self.store.create_suggestion(data).await
    }

    /// Record the admin's decision on a pending suggestion
    pub async fn set_status(&self, id: i32, status: SuggestionStatus) -> AppResult<BookSuggestion> {
        if status == SuggestionStatus::Pending {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("decision");
            error.message = Some("Status must be approved or rejected".into());
            errors.add("status", error);
            return Err(AppError::InvalidInput(errors));
        }

        let suggestion = self
            .store
            .set_suggestion_status(id, status)
            .await?
            .ok_or_else(|| suggestion_not_found(id))?;
        tracing::info!(suggestion_id = id, status = ?status, "Suggestion reviewed");
        Ok(suggestion)
    }
}

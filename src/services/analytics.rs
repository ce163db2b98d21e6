//! Analytics over the circulation log

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::AppResult,
    models::{BookReadCount, IssuedBook, LibrarySummary, ReaderActivity},
    repository::AnalyticsStore,
};

#[derive(Clone)]
pub struct AnalyticsService {
    store: Arc<dyn AnalyticsStore>,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn AnalyticsStore>) -> Self {
        Self { store }
    }

    pub async fn most_read_books(&self) -> AppResult<Vec<BookReadCount>> {
        self.store.most_read_books().await
    }

    pub async fn most_active_readers(&self) -> AppResult<Vec<ReaderActivity>> {
        self.store.most_active_readers().await
    }

    /// Open loans ordered by due date, flagged against the current time
    pub async fn issued_books(&self) -> AppResult<Vec<IssuedBook>> {
        self.store.issued_books(Utc::now()).await
    }

    pub async fn summary(&self) -> AppResult<LibrarySummary> {
        self.store.summary(Utc::now()).await
    }
}

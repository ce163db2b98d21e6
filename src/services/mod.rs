//! Business logic services

pub mod analytics;
pub mod auth;
pub mod catalog;
pub mod circulation;
pub mod members;
pub mod reviews;
pub mod suggestions;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::Storage};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    pub suggestions: suggestions::SuggestionsService,
    pub reviews: reviews::ReviewsService,
    pub circulation: circulation::CirculationService,
    pub analytics: analytics::AnalyticsService,
    storage: Arc<dyn Storage>,
}

impl Services {
    /// Create all services on top of one storage backend
    pub fn new<S: Storage + 'static>(storage: Arc<S>, config: &AppConfig) -> Self {
        Self {
            auth: auth::AuthService::new(config.auth.clone()),
            catalog: catalog::CatalogService::new(storage.clone(), storage.clone()),
            members: members::MembersService::new(storage.clone(), storage.clone()),
            suggestions: suggestions::SuggestionsService::new(storage.clone()),
            reviews: reviews::ReviewsService::new(storage.clone(), storage.clone()),
            circulation: circulation::CirculationService::new(
                storage.clone(),
                config.circulation.loan_period_days,
            ),
            analytics: analytics::AnalyticsService::new(storage.clone()),
            storage,
        }
    }

    /// Name of the storage backend in use
    pub fn backend(&self) -> &'static str {
        self.storage.backend()
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.storage.ping().await
    }
}

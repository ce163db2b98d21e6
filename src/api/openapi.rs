//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, auth, books, categories, circulation, health, members, reviews, suggestions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.3.0",
        description = "Library management REST API: catalog, members, circulation and analytics"
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Books
        books::list_books,
        books::search_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Members
        members::list_members,
        members::search_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::delete_member,
        members::member_circulation,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Suggestions
        suggestions::list_suggestions,
        suggestions::get_suggestion,
        suggestions::create_suggestion,
        suggestions::update_suggestion_status,
        // Reviews
        reviews::list_reviews,
        reviews::get_review,
        reviews::book_reviews,
        reviews::create_review,
        // Circulation
        circulation::list_circulation,
        circulation::record_circulation,
        circulation::active_loans,
        circulation::overdue_loans,
        // Analytics
        analytics::most_read_books,
        analytics::most_active_readers,
        analytics::issued_books,
        analytics::summary,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::AdminInfo,
            // Catalog
            crate::models::Book,
            crate::models::CreateBook,
            crate::models::UpdateBook,
            crate::models::BookStatus,
            crate::models::Category,
            crate::models::CategoryInput,
            // Members
            crate::models::Member,
            crate::models::CreateMember,
            crate::models::UpdateMember,
            // Suggestions and reviews
            crate::models::BookSuggestion,
            crate::models::CreateSuggestion,
            crate::models::UpdateSuggestionStatus,
            crate::models::SuggestionStatus,
            crate::models::BookReview,
            crate::models::CreateReview,
            // Circulation
            crate::models::Circulation,
            crate::models::CirculationRequest,
            crate::models::CirculationAction,
            crate::models::CirculationStatus,
            // Analytics
            crate::models::BookReadCount,
            crate::models::ReaderActivity,
            crate::models::IssuedBook,
            crate::models::LibrarySummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Admin authentication"),
        (name = "books", description = "Book catalog"),
        (name = "members", description = "Member management"),
        (name = "categories", description = "Book categories"),
        (name = "suggestions", description = "Acquisition suggestions"),
        (name = "reviews", description = "Book reviews"),
        (name = "circulation", description = "Issue and return"),
        (name = "analytics", description = "Dashboard analytics")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by admin routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

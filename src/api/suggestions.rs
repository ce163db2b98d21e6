//! Book suggestion endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{BookSuggestion, CreateSuggestion, UpdateSuggestionStatus},
    AppState,
};

use super::{AdminUser, ValidatedJson};

/// List all suggestions in submission order
#[utoipa::path(
    get,
    path = "/book-suggestions",
    tag = "suggestions",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "List of suggestions", body = Vec<BookSuggestion>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_suggestions(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<BookSuggestion>>> {
    Ok(Json(state.services.suggestions.list().await?))
}

/// Get a suggestion by ID
#[utoipa::path(
    get,
    path = "/book-suggestions/{id}",
    tag = "suggestions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Suggestion ID")
    ),
    responses(
        (status = 200, description = "Suggestion", body = BookSuggestion),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Suggestion not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_suggestion(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> AppResult<Json<BookSuggestion>> {
    Ok(Json(state.services.suggestions.get(id).await?))
}

/// Suggest a book for acquisition
#[utoipa::path(
    post,
    path = "/book-suggestions",
    tag = "suggestions",
    request_body = CreateSuggestion,
    responses(
        (status = 201, description = "Suggestion recorded", body = BookSuggestion),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_suggestion(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<CreateSuggestion>,
) -> AppResult<(StatusCode, Json<BookSuggestion>)> {
    let created = state.services.suggestions.create(&data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Approve or reject a pending suggestion
#[utoipa::path(
    put,
    path = "/book-suggestions/{id}",
    tag = "suggestions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Suggestion ID")
    ),
    request_body = UpdateSuggestionStatus,
    responses(
        (status = 200, description = "Suggestion updated", body = BookSuggestion),
        (status = 400, description = "Status is not a decision", body = crate::error::ErrorResponse),
        (status = 404, description = "Suggestion not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Suggestion already decided", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_suggestion_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    ValidatedJson(data): ValidatedJson<UpdateSuggestionStatus>,
) -> AppResult<Json<BookSuggestion>> {
    Ok(Json(state.services.suggestions.set_status(id, data.status).await?))
}

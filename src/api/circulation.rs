//! Circulation endpoints: issue, return and loan listings

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::{Circulation, CirculationRequest},
    AppState,
};

use super::{AdminUser, ValidatedJson};

/// Full circulation log, newest first
#[utoipa::path(
    get,
    path = "/circulation",
    tag = "circulation",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Circulation records", body = Vec<Circulation>),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_circulation(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Circulation>>> {
    Ok(Json(state.services.circulation.list().await?))
}

/// Issue or return a book
///
/// `action = borrow` opens a loan for `memberId` and marks the book issued.
/// `action = return` closes the open loan of the book and frees it.
#[utoipa::path(
    post,
    path = "/circulation",
    tag = "circulation",
    security(("bearer_auth" = [])),
    request_body = CirculationRequest,
    responses(
        (status = 201, description = "Circulation record created", body = Circulation),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book, member or open loan not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book not available, or on loan to another member", body = crate::error::ErrorResponse)
    )
)]
pub async fn record_circulation(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CirculationRequest>,
) -> AppResult<(StatusCode, Json<Circulation>)> {
    let created = state.services.circulation.record(&request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Open loans, ordered by due date
#[utoipa::path(
    get,
    path = "/circulation/active",
    tag = "circulation",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active loans", body = Vec<Circulation>)
    )
)]
pub async fn active_loans(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Circulation>>> {
    Ok(Json(state.services.circulation.active().await?))
}

/// Open loans past their due date
#[utoipa::path(
    get,
    path = "/circulation/overdue",
    tag = "circulation",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Overdue loans", body = Vec<Circulation>)
    )
)]
pub async fn overdue_loans(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Circulation>>> {
    Ok(Json(state.services.circulation.overdue().await?))
}

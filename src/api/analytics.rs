//! Analytics endpoints (admin dashboard)

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{BookReadCount, IssuedBook, LibrarySummary, ReaderActivity},
    AppState,
};

use super::AdminUser;

#[utoipa::path(
    get,
    path = "/analytics/most-read-books",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Books by borrow count, highest first", body = Vec<BookReadCount>)
    )
)]
pub async fn most_read_books(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<BookReadCount>>> {
    Ok(Json(state.services.analytics.most_read_books().await?))
}

#[utoipa::path(
    get,
    path = "/analytics/most-active-readers",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Members by borrow count, highest first", body = Vec<ReaderActivity>)
    )
)]
pub async fn most_active_readers(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<ReaderActivity>>> {
    Ok(Json(state.services.analytics.most_active_readers().await?))
}

/// Books currently out, with borrower and overdue flag
#[utoipa::path(
    get,
    path = "/analytics/issued-books",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Issued books ordered by due date", body = Vec<IssuedBook>)
    )
)]
pub async fn issued_books(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<IssuedBook>>> {
    Ok(Json(state.services.analytics.issued_books().await?))
}

#[utoipa::path(
    get,
    path = "/analytics/summary",
    tag = "analytics",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = LibrarySummary)
    )
)]
pub async fn summary(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<LibrarySummary>> {
    Ok(Json(state.services.analytics.summary().await?))
}

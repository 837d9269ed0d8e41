use axum::{extract::State, http::StatusCode};
use chrono::NaiveDate;
use models::physical_progress;
use serde::Deserialize;
use service::physical_progress::domain::{NewPhysicalProgress, PhysicalProgressPatch};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::ServerState, created, ok, ApiResult};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DateRange {
    #[param(value_type = String, example = "2024-03-01")]
    pub start: NaiveDate,
    #[param(value_type = String, example = "2024-03-31")]
    pub end: NaiveDate,
}

#[utoipa::path(get, path = "/api/user/progress", tag = "progress", responses((status = 200, description = "All progress records")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<physical_progress::Model>> {
    ok("Progress retrieved", state.services.progress.list().await?)
}

#[utoipa::path(
    post, path = "/api/user/progress", tag = "progress",
    request_body = crate::openapi::NewPhysicalProgressDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<NewPhysicalProgress>,
) -> ApiResult<physical_progress::Model> {
    created("Progress recorded", state.services.progress.create(input).await?)
}

#[utoipa::path(
    get, path = "/api/user/progress/{id}", tag = "progress",
    params(("id" = String, Path, description = "Progress id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> ApiResult<physical_progress::Model> {
    ok("Progress retrieved", state.services.progress.get(&id).await?)
}

#[utoipa::path(
    put, path = "/api/user/progress/{id}", tag = "progress",
    params(("id" = String, Path, description = "Progress id")),
    request_body = crate::openapi::PhysicalProgressPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<PhysicalProgressPatch>,
) -> ApiResult<physical_progress::Model> {
    ok("Progress updated", state.services.progress.update(&id, patch).await?)
}

#[utoipa::path(
    delete, path = "/api/user/progress/{id}", tag = "progress",
    params(("id" = String, Path, description = "Progress id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<StatusCode, ApiError> {
    state.services.progress.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/user/progress/user/{user_id}", tag = "progress",
    params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_user(State(state): State<ServerState>, ApiPath(user_id): ApiPath<String>) -> ApiResult<Vec<physical_progress::Model>> {
    ok("Progress retrieved", state.services.progress.list_by_user(&user_id).await?)
}

#[utoipa::path(
    get, path = "/api/user/progress/date/{date}", tag = "progress",
    params(("date" = String, Path, description = "YYYY-MM-DD")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_date(State(state): State<ServerState>, ApiPath(date): ApiPath<NaiveDate>) -> ApiResult<Vec<physical_progress::Model>> {
    ok("Progress retrieved", state.services.progress.list_by_registration_date(date).await?)
}

#[utoipa::path(
    get, path = "/api/user/progress/user/{user_id}/date/{date}", tag = "progress",
    params(("user_id" = String, Path, description = "User id"), ("date" = String, Path, description = "YYYY-MM-DD")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_user_and_date(
    State(state): State<ServerState>,
    ApiPath((user_id, date)): ApiPath<(String, NaiveDate)>,
) -> ApiResult<Vec<physical_progress::Model>> {
    ok("Progress retrieved", state.services.progress.list_by_user_and_date(&user_id, date).await?)
}

#[utoipa::path(
    get, path = "/api/user/progress/user/{user_id}/range", tag = "progress",
    params(("user_id" = String, Path, description = "User id"), DateRange),
    responses((status = 200, description = "OK"), (status = 400, description = "start is after end"))
)]
pub async fn by_user_and_range(
    State(state): State<ServerState>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(range): ApiQuery<DateRange>,
) -> ApiResult<Vec<physical_progress::Model>> {
    let records = state
        .services
        .progress
        .list_by_user_and_date_between(&user_id, range.start, range.end)
        .await?;
    ok("Progress retrieved", records)
}

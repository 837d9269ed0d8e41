use axum::{extract::State, http::StatusCode};
use chrono::NaiveDate;
use models::report;
use service::report::domain::{NewReport, ReportPatch};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::{auth::ServerState, created, ok, ApiResult};

#[utoipa::path(get, path = "/api/trainer/reports", tag = "reports", responses((status = 200, description = "All reports")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<report::Model>> {
    ok("Reports retrieved", state.services.reports.list().await?)
}

#[utoipa::path(
    post, path = "/api/trainer/reports", tag = "reports",
    request_body = crate::openapi::NewReportDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Coach not found")
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewReport>) -> ApiResult<report::Model> {
    created("Report created", state.services.reports.create(input).await?)
}

#[utoipa::path(
    get, path = "/api/trainer/reports/{id}", tag = "reports",
    params(("id" = String, Path, description = "Report id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> ApiResult<report::Model> {
    ok("Report retrieved", state.services.reports.get(&id).await?)
}

#[utoipa::path(
    put, path = "/api/trainer/reports/{id}", tag = "reports",
    params(("id" = String, Path, description = "Report id")),
    request_body = crate::openapi::ReportPatchDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<ReportPatch>,
) -> ApiResult<report::Model> {
    ok("Report updated", state.services.reports.update(&id, patch).await?)
}

#[utoipa::path(
    delete, path = "/api/trainer/reports/{id}", tag = "reports",
    params(("id" = String, Path, description = "Report id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<StatusCode, ApiError> {
    state.services.reports.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/trainer/reports/date/{date}", tag = "reports",
    params(("date" = String, Path, description = "Generation date, YYYY-MM-DD")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_date(State(state): State<ServerState>, ApiPath(date): ApiPath<NaiveDate>) -> ApiResult<Vec<report::Model>> {
    ok("Reports retrieved", state.services.reports.list_by_generated_at(date).await?)
}

#[utoipa::path(
    get, path = "/api/trainer/reports/coach/{coach_id}", tag = "reports",
    params(("coach_id" = String, Path, description = "Coach user id")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_coach(State(state): State<ServerState>, ApiPath(coach_id): ApiPath<String>) -> ApiResult<Vec<report::Model>> {
    ok("Reports retrieved", state.services.reports.list_by_coach(&coach_id).await?)
}

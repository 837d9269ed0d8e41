use axum::{extract::State, http::StatusCode};
use chrono::{NaiveDate, NaiveTime};
use models::gym_session;
use serde::Deserialize;
use service::gym_session::domain::{GymSessionPatch, NewGymSession};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::ServerState, created, ok, ApiResult};

/// `?start=HH:MM:SS&end=HH:MM:SS`
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TimeRange {
    #[param(value_type = String, example = "09:00:00")]
    pub start: NaiveTime,
    #[param(value_type = String, example = "12:00:00")]
    pub end: NaiveTime,
}

#[utoipa::path(get, path = "/api/user/sessions", tag = "sessions", responses((status = 200, description = "All sessions")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<gym_session::Model>> {
    ok("Sessions retrieved", state.services.sessions.list().await?)
}

#[utoipa::path(
    get, path = "/api/user/sessions/{id}", tag = "sessions",
    params(("id" = String, Path, description = "Session id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> ApiResult<gym_session::Model> {
    ok("Session retrieved", state.services.sessions.get(&id).await?)
}

#[utoipa::path(
    get, path = "/api/user/sessions/coach/{coach_id}", tag = "sessions",
    params(("coach_id" = String, Path, description = "Coach user id")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_coach(State(state): State<ServerState>, ApiPath(coach_id): ApiPath<String>) -> ApiResult<Vec<gym_session::Model>> {
    ok("Sessions retrieved", state.services.sessions.list_by_coach(&coach_id).await?)
}

#[utoipa::path(
    get, path = "/api/user/sessions/capacity/{capacity}", tag = "sessions",
    params(("capacity" = i32, Path, description = "Exact capacity")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_capacity(State(state): State<ServerState>, ApiPath(capacity): ApiPath<i32>) -> ApiResult<Vec<gym_session::Model>> {
    ok("Sessions retrieved", state.services.sessions.list_by_capacity(capacity).await?)
}

#[utoipa::path(
    get, path = "/api/user/sessions/date/{date}", tag = "sessions",
    params(("date" = String, Path, description = "YYYY-MM-DD")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_date(State(state): State<ServerState>, ApiPath(date): ApiPath<NaiveDate>) -> ApiResult<Vec<gym_session::Model>> {
    ok("Sessions retrieved", state.services.sessions.list_by_date(date).await?)
}

#[utoipa::path(
    get, path = "/api/user/sessions/date/{date}/time", tag = "sessions",
    params(("date" = String, Path, description = "YYYY-MM-DD"), TimeRange),
    responses((status = 200, description = "Sessions whose start time is within the range"), (status = 400, description = "Inverted range"))
)]
pub async fn by_date_and_time(
    State(state): State<ServerState>,
    ApiPath(date): ApiPath<NaiveDate>,
    ApiQuery(range): ApiQuery<TimeRange>,
) -> ApiResult<Vec<gym_session::Model>> {
    let sessions = state
        .services
        .sessions
        .list_by_date_and_start_between(date, range.start, range.end)
        .await?;
    ok("Sessions retrieved", sessions)
}

#[utoipa::path(
    get, path = "/api/user/sessions/time", tag = "sessions",
    params(TimeRange),
    responses((status = 200, description = "Sessions with exactly this start and end time"))
)]
pub async fn by_time(State(state): State<ServerState>, ApiQuery(range): ApiQuery<TimeRange>) -> ApiResult<Vec<gym_session::Model>> {
    ok("Sessions retrieved", state.services.sessions.list_by_start_and_end(range.start, range.end).await?)
}

#[utoipa::path(
    get, path = "/api/user/sessions/end-time/{end_time}", tag = "sessions",
    params(("end_time" = String, Path, description = "HH:MM:SS")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_end_time(State(state): State<ServerState>, ApiPath(end): ApiPath<NaiveTime>) -> ApiResult<Vec<gym_session::Model>> {
    ok("Sessions retrieved", state.services.sessions.list_by_end_time(end).await?)
}

#[utoipa::path(
    post, path = "/api/trainer/sessions", tag = "sessions",
    request_body = crate::openapi::NewGymSessionDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Coach not found")
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewGymSession>) -> ApiResult<gym_session::Model> {
    created("Session created", state.services.sessions.create(input).await?)
}

#[utoipa::path(
    put, path = "/api/trainer/sessions/{id}", tag = "sessions",
    params(("id" = String, Path, description = "Session id")),
    request_body = crate::openapi::GymSessionPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<GymSessionPatch>,
) -> ApiResult<gym_session::Model> {
    ok("Session updated", state.services.sessions.update(&id, patch).await?)
}

#[utoipa::path(
    put, path = "/api/trainer/sessions/{id}/attendance", tag = "sessions",
    params(("id" = String, Path, description = "Session id")),
    request_body = Vec<bool>,
    responses(
        (status = 200, description = "Attendance stored"),
        (status = 400, description = "More marks than capacity"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_attendance(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(marks): ApiJson<Vec<bool>>,
) -> ApiResult<gym_session::Model> {
    ok("Attendance updated", state.services.sessions.update_attendance(&id, marks).await?)
}

#[utoipa::path(
    delete, path = "/api/trainer/sessions/{id}", tag = "sessions",
    params(("id" = String, Path, description = "Session id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<StatusCode, ApiError> {
    state.services.sessions.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

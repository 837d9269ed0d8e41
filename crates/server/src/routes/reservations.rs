use axum::{extract::State, http::StatusCode};
use chrono::NaiveDateTime;
use models::reservation::{self, ReservationStatus};
use serde::Deserialize;
use service::errors::ServiceError;
use service::reservation::domain::{NewReservation, ReservationPatch};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::{auth::ServerState, created, ok, ApiResult};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DateTimeQuery {
    #[param(value_type = String, example = "2024-05-01T08:00:00")]
    pub datetime: NaiveDateTime,
}

#[utoipa::path(get, path = "/api/trainer/reservations", tag = "reservations", responses((status = 200, description = "All reservations")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<reservation::Model>> {
    ok("Reservations retrieved", state.services.reservations.list().await?)
}

#[utoipa::path(
    get, path = "/api/trainer/reservations/session/{session_id}", tag = "reservations",
    params(("session_id" = String, Path, description = "Session id")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_session(State(state): State<ServerState>, ApiPath(session_id): ApiPath<String>) -> ApiResult<Vec<reservation::Model>> {
    ok("Reservations retrieved", state.services.reservations.list_by_session(&session_id).await?)
}

#[utoipa::path(
    get, path = "/api/trainer/reservations/date", tag = "reservations",
    params(DateTimeQuery),
    responses((status = 200, description = "OK"))
)]
pub async fn by_date(State(state): State<ServerState>, ApiQuery(q): ApiQuery<DateTimeQuery>) -> ApiResult<Vec<reservation::Model>> {
    ok("Reservations retrieved", state.services.reservations.list_by_reservation_date(q.datetime).await?)
}

#[utoipa::path(
    get, path = "/api/trainer/reservations/status/{status}", tag = "reservations",
    params(("status" = String, Path, description = "PENDING, CONFIRMED or CANCELLED")),
    responses((status = 200, description = "OK"), (status = 400, description = "Unknown status"))
)]
pub async fn by_status(State(state): State<ServerState>, ApiPath(status): ApiPath<String>) -> ApiResult<Vec<reservation::Model>> {
    let status: ReservationStatus = status.parse().map_err(ServiceError::from)?;
    ok("Reservations retrieved", state.services.reservations.list_by_status(status).await?)
}

#[utoipa::path(
    post, path = "/api/user/reservations", tag = "reservations",
    request_body = crate::openapi::NewReservationDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "User or session not found")
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewReservation>) -> ApiResult<reservation::Model> {
    created("Reservation created", state.services.reservations.create(input).await?)
}

#[utoipa::path(
    get, path = "/api/user/reservations/{id}", tag = "reservations",
    params(("id" = String, Path, description = "Reservation id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> ApiResult<reservation::Model> {
    ok("Reservation retrieved", state.services.reservations.get(&id).await?)
}

#[utoipa::path(
    put, path = "/api/user/reservations/{id}", tag = "reservations",
    params(("id" = String, Path, description = "Reservation id")),
    request_body = crate::openapi::ReservationPatchDoc,
    responses((status = 200, description = "Updated"), (status = 404, description = "Not Found"))
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<ReservationPatch>,
) -> ApiResult<reservation::Model> {
    ok("Reservation updated", state.services.reservations.update(&id, patch).await?)
}

#[utoipa::path(
    delete, path = "/api/user/reservations/{id}", tag = "reservations",
    params(("id" = String, Path, description = "Reservation id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<StatusCode, ApiError> {
    state.services.reservations.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/user/reservations/user/{user_id}", tag = "reservations",
    params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_user(State(state): State<ServerState>, ApiPath(user_id): ApiPath<String>) -> ApiResult<Vec<reservation::Model>> {
    ok("Reservations retrieved", state.services.reservations.list_by_user(&user_id).await?)
}

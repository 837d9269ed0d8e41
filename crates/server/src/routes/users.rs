use axum::{extract::State, http::StatusCode};
use chrono::NaiveDate;
use models::user::{self, Role};
use service::user::domain::{NewUser, UserPatch};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::routes::{auth::ServerState, created, ok, ApiResult};

#[utoipa::path(get, path = "/api/admin/users", tag = "users", responses((status = 200, description = "All users")))]
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<user::Model>> {
    ok("Users retrieved", state.services.users.list().await?)
}

#[utoipa::path(
    post, path = "/api/admin/users", tag = "users",
    request_body = crate::openapi::NewUserDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Duplicate id or email")
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewUser>) -> ApiResult<user::Model> {
    created("User created", state.services.users.create(input).await?)
}

#[utoipa::path(
    get, path = "/api/admin/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> ApiResult<user::Model> {
    ok("User retrieved", state.services.users.get(&id).await?)
}

#[utoipa::path(
    put, path = "/api/admin/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    request_body = crate::openapi::UserPatchDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email taken")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> ApiResult<user::Model> {
    ok("User updated", state.services.users.update(&id, patch).await?)
}

#[utoipa::path(
    delete, path = "/api/admin/users/{id}", tag = "users",
    params(("id" = String, Path, description = "User id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<String>) -> Result<StatusCode, ApiError> {
    state.services.users.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/api/admin/users/name/{name}", tag = "users", params(("name" = String, Path, description = "Exact user name")), responses((status = 200, description = "OK")))]
pub async fn by_name(State(state): State<ServerState>, ApiPath(name): ApiPath<String>) -> ApiResult<Vec<user::Model>> {
    ok("Users retrieved", state.services.users.list_by_name(&name).await?)
}

#[utoipa::path(
    get, path = "/api/admin/users/email/{email}", tag = "users",
    params(("email" = String, Path, description = "User email")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn by_email(State(state): State<ServerState>, ApiPath(email): ApiPath<String>) -> ApiResult<user::Model> {
    ok("User retrieved", state.services.users.get_by_email(&email).await?)
}

#[utoipa::path(
    get, path = "/api/admin/users/role/{role}", tag = "users",
    params(("role" = String, Path, description = "STUDENT, TRAINER or ADMIN")),
    responses((status = 200, description = "OK"), (status = 400, description = "Unknown role"))
)]
pub async fn by_role(State(state): State<ServerState>, ApiPath(role): ApiPath<String>) -> ApiResult<Vec<user::Model>> {
    let role: Role = role.parse().map_err(service::errors::ServiceError::from)?;
    ok("Users retrieved", state.services.users.list_by_role(role).await?)
}

#[utoipa::path(
    get, path = "/api/admin/users/date/{date}", tag = "users",
    params(("date" = String, Path, description = "Registration date, YYYY-MM-DD")),
    responses((status = 200, description = "OK"))
)]
pub async fn by_registration_date(
    State(state): State<ServerState>,
    ApiPath(date): ApiPath<NaiveDate>,
) -> ApiResult<Vec<user::Model>> {
    ok("Users retrieved", state.services.users.list_by_registration_date(date).await?)
}

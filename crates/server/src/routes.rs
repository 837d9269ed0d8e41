pub mod auth;
pub mod progress;
pub mod reports;
pub mod reservations;
pub mod sessions;
pub mod users;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use common::types::{ApiResponse, Health};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use auth::ServerState;

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub(crate) fn ok<T>(message: &str, data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::ok(message, data))))
}

pub(crate) fn created<T>(message: &str, data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message, data))))
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/users", get(users::list).post(users::create))
        .route("/api/admin/users/:id", get(users::get).put(users::update).delete(users::delete))
        .route("/api/admin/users/name/:name", get(users::by_name))
        .route("/api/admin/users/email/:email", get(users::by_email))
        .route("/api/admin/users/role/:role", get(users::by_role))
        .route("/api/admin/users/date/:date", get(users::by_registration_date))
}

fn trainer_routes() -> Router<ServerState> {
    Router::new()
        .route("/api/trainer/sessions", post(sessions::create))
        .route("/api/trainer/sessions/:id", put(sessions::update).delete(sessions::delete))
        .route("/api/trainer/sessions/:id/attendance", put(sessions::update_attendance))
        .route("/api/trainer/reservations", get(reservations::list))
        .route("/api/trainer/reservations/session/:session_id", get(reservations::by_session))
        .route("/api/trainer/reservations/date", get(reservations::by_date))
        .route("/api/trainer/reservations/status/:status", get(reservations::by_status))
        .route("/api/trainer/reports", get(reports::list).post(reports::create))
        .route("/api/trainer/reports/:id", get(reports::get).put(reports::update).delete(reports::delete))
        .route("/api/trainer/reports/date/:date", get(reports::by_date))
        .route("/api/trainer/reports/coach/:coach_id", get(reports::by_coach))
}

fn user_routes() -> Router<ServerState> {
    Router::new()
        .route("/api/user/sessions", get(sessions::list))
        .route("/api/user/sessions/:id", get(sessions::get))
        .route("/api/user/sessions/coach/:coach_id", get(sessions::by_coach))
        .route("/api/user/sessions/capacity/:capacity", get(sessions::by_capacity))
        .route("/api/user/sessions/date/:date", get(sessions::by_date))
        .route("/api/user/sessions/date/:date/time", get(sessions::by_date_and_time))
        .route("/api/user/sessions/time", get(sessions::by_time))
        .route("/api/user/sessions/end-time/:end_time", get(sessions::by_end_time))
        .route("/api/user/reservations", post(reservations::create))
        .route(
            "/api/user/reservations/:id",
            get(reservations::get).put(reservations::update).delete(reservations::delete),
        )
        .route("/api/user/reservations/user/:user_id", get(reservations::by_user))
        .route("/api/user/progress", get(progress::list).post(progress::create))
        .route("/api/user/progress/:id", get(progress::get).put(progress::update).delete(progress::delete))
        .route("/api/user/progress/user/:user_id", get(progress::by_user))
        .route("/api/user/progress/date/:date", get(progress::by_date))
        .route("/api/user/progress/user/:user_id/date/:date", get(progress::by_user_and_date))
        .route("/api/user/progress/user/:user_id/range", get(progress::by_user_and_range))
}

/// Build the full application router: public routes, scoped API routes behind the bearer-token
/// middleware, Swagger UI, CORS and request tracing.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/login", post(auth::login));

    let api = Router::new()
        .merge(admin_routes())
        .merge(trainer_routes())
        .merge(user_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_scope));

    public
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

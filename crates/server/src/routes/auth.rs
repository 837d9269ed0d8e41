use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use service::{
    auth::{domain::{AuthSession, LoginInput}, errors::AuthError, Scope},
    GymServices,
};
use tracing::{debug, info};

use crate::errors::ApiError;
use crate::extract::ApiJson;
use crate::routes::{ok, ApiResult};

#[derive(Clone)]
pub struct ServerState {
    pub services: GymServices,
}

#[utoipa::path(
    post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Logged In"), (status = 401, description = "Unauthorized"))
)]
pub async fn login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> ApiResult<AuthSession> {
    let session = state.services.auth.login(input).await?;
    info!(user_id = %session.user.id, "login_ok");
    ok("Login successful", session)
}

fn bearer_token(req: &Request) -> Result<Option<&str>, ApiError> {
    let Some(raw) = req.headers().get(AUTHORIZATION) else { return Ok(None) };
    let value = raw
        .to_str()
        .map_err(|_| AuthError::TokenError("non-ascii Authorization header".into()))?;
    match value.strip_prefix("Bearer ") {
        Some(token) => Ok(Some(token.trim())),
        None => Err(AuthError::TokenError("expected `Authorization: Bearer <token>`".into()).into()),
    }
}

/// Middleware for `/api/{user|trainer|admin}/...`: validates the bearer token and checks the
/// caller's role against the scope's permissions. Verified claims are put into request extensions.
pub async fn require_scope(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let Some(scope) = Scope::from_path(req.uri().path()) else {
        return Ok(next.run(req).await);
    };
    let claims = state.services.auth.authorize(bearer_token(&req)?, scope)?;
    debug!(user_id = %claims.sub, role = %claims.role, ?scope, "authorized");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

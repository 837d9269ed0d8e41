use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::AppConfig;
use serde_json::{json, Value};
use tower::Service;

const ADMIN_EMAIL: &str = "admin@gym.test";
const ADMIN_PASSWORD: &str = "Adm1nPass!";

fn memory_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.database.url = configs::MEMORY_STORE_URL.into();
    cfg.auth.jwt_secret = "test-secret".into();
    cfg.auth.bootstrap_admin_email = Some(ADMIN_EMAIL.into());
    cfg.auth.bootstrap_admin_password = Some(ADMIN_PASSWORD.into());
    cfg
}

async fn build_app() -> anyhow::Result<Router> {
    let state = server::build_state(&memory_config()).await?;
    Ok(server::build_app(state))
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        builder = builder.header("authorization", format!("Bearer {t}"));
    }
    let req = builder.body(match body {
        Some(v) => Body::from(serde_json::to_vec(&v)?),
        None => Body::empty(),
    })?;
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

async fn login(app: &Router, email: &str, password: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/auth/login", None, Some(json!({"email": email, "password": password}))).await?;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    Ok(body["data"]["token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn login_with_bootstrap_admin() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/auth/login", None, Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["role"], "ADMIN");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = send(&app, "POST", "/auth/login", None, Some(json!({"email": ADMIN_EMAIL, "password": "wrong-pass"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
    Ok(())
}

#[tokio::test]
async fn scoped_routes_require_token_and_role() -> anyhow::Result<()> {
    let app = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;

    let (status, _) = send(&app, "GET", "/api/admin/users", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, "GET", "/api/admin/users", Some("not-a-jwt"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let student = json!({"id": "s1", "name": "Sam", "email": "sam@gym.test", "password": "StudentPass1", "role": "STUDENT"});
    let (status, _) = send(&app, "POST", "/api/admin/users", Some(&admin), Some(student)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let student_token = login(&app, "sam@gym.test", "StudentPass1").await?;
    let (status, body) = send(&app, "GET", "/api/admin/users", Some(&student_token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
    let (status, _) = send(&app, "GET", "/api/trainer/reservations", Some(&student_token), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "GET", "/api/user/sessions", Some(&student_token), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", "/api/trainer/reservations", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn admin_user_crud() -> anyhow::Result<()> {
    let app = build_app().await?;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await?;

    let u1 = json!({"id": "u1", "name": "Ana", "email": "a@x.com", "role": "STUDENT", "registration_date": "2024-03-01"});
    let (status, body) = send(&app, "POST", "/api/admin/users", Some(&admin), Some(u1)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "a@x.com");
    assert!(body["data"].get("password_hash").is_none());

    let u2 = json!({"id": "u2", "name": "Bea", "email": "b@x.com", "role": "TRAINER"});
    let (status, _) = send(&app, "POST", "/api/admin/users", Some(&admin), Some(u2)).await?;
    assert_eq!(status, StatusCode::CREATED);

    let dup = json!({"id": "u3", "name": "Dup", "email": "a@x.com", "role": "STUDENT"});
    let (status, _) = send(&app, "POST", "/api/admin/users", Some(&admin), Some(dup)).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let missing_id = json!({"name": "No Id", "email": "n@x.com", "role": "STUDENT"});
    let (status, body) = send(&app, "POST", "/api/admin/users", Some(&admin), Some(missing_id)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "PUT", "/api/admin/users/u1", Some(&admin), Some(json!({"email": "b@x.com"}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, body) = send(&app, "PUT", "/api/admin/users/u1", Some(&admin), Some(json!({"email": "a@x.com"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Ana");
    let (status, _) = send(&app, "PUT", "/api/admin/users/u1", Some(&admin), Some(json!({"name": null}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "PUT", "/api/admin/users/ghost", Some(&admin), Some(json!({"name": "X"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/admin/users/role/trainer", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    let (status, _) = send(&app, "GET", "/api/admin/users/role/coach", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send(&app, "GET", "/api/admin/users/date/2024-03-01", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], "u1");
    let (status, _) = send(&app, "GET", "/api/admin/users/email/b@x.com", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "DELETE", "/api/admin/users/u1", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    let (status, _) = send(&app, "GET", "/api/admin/users/u1", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", "/api/admin/users/u1", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/admin/users").is_some());
    Ok(())
}

use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::{auth::service::AuthConfig, GymServices, Repositories};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Pick the store from config, run migrations when asked and wire the services.
/// Creates the bootstrap admin when one is configured.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let repos = if cfg.database.is_memory() {
        warn!("using in-memory store; data is lost on restart");
        Repositories::in_memory()
    } else {
        let db = models::db::connect_with_config(&cfg.database)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        if cfg.database.run_migrations {
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Database(format!("migrations failed: {e}")))?;
            info!("migrations applied");
        }
        Repositories::seaorm(db)
    };

    let services = GymServices::new(
        repos,
        AuthConfig { jwt_secret: cfg.auth.jwt_secret.clone(), token_ttl_hours: cfg.auth.token_ttl_hours },
    );

    if let (Some(email), Some(password)) = (&cfg.auth.bootstrap_admin_email, &cfg.auth.bootstrap_admin_password) {
        let admin = services
            .users
            .ensure_admin(email, password)
            .await
            .map_err(|e| StartupError::InvalidConfig(format!("bootstrap admin: {e}")))?;
        info!(user_id = %admin.id, "bootstrap admin ready");
    }

    Ok(ServerState { services })
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    init_logging(LogFormat::parse(&cfg.server.log_format));

    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, store = if cfg.database.is_memory() { "memory" } else { "postgres" }, "starting gym server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

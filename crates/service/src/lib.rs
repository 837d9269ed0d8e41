//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access: every collection sits behind a repository trait
//!   with a SeaORM implementation and an in-memory one.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod patch;
pub mod storage;
pub mod auth;
pub mod user;
pub mod gym_session;
pub mod reservation;
pub mod physical_progress;
pub mod report;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::service::{AuthConfig, AuthService};
use crate::gym_session::repository::{memory::InMemoryGymSessionRepository, GymSessionRepository, SeaOrmGymSessionRepository};
use crate::gym_session::GymSessionService;
use crate::physical_progress::repository::{
    memory::InMemoryPhysicalProgressRepository, PhysicalProgressRepository, SeaOrmPhysicalProgressRepository,
};
use crate::physical_progress::PhysicalProgressService;
use crate::report::repository::{memory::InMemoryReportRepository, ReportRepository, SeaOrmReportRepository};
use crate::report::ReportService;
use crate::reservation::repository::{memory::InMemoryReservationRepository, ReservationRepository, SeaOrmReservationRepository};
use crate::reservation::ReservationService;
use crate::user::repository::{memory::InMemoryUserRepository, SeaOrmUserRepository, UserRepository};
use crate::user::UserService;

/// One repository per collection, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn GymSessionRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub progress: Arc<dyn PhysicalProgressRepository>,
    pub reports: Arc<dyn ReportRepository>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(SeaOrmUserRepository { db: db.clone() }),
            sessions: Arc::new(SeaOrmGymSessionRepository { db: db.clone() }),
            reservations: Arc::new(SeaOrmReservationRepository { db: db.clone() }),
            progress: Arc::new(SeaOrmPhysicalProgressRepository { db: db.clone() }),
            reports: Arc::new(SeaOrmReportRepository { db }),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::default()),
            sessions: Arc::new(InMemoryGymSessionRepository::default()),
            reservations: Arc::new(InMemoryReservationRepository::default()),
            progress: Arc::new(InMemoryPhysicalProgressRepository::default()),
            reports: Arc::new(InMemoryReportRepository::default()),
        }
    }
}

/// All application services wired over one set of repositories.
#[derive(Clone)]
pub struct GymServices {
    pub users: Arc<UserService>,
    pub sessions: Arc<GymSessionService>,
    pub reservations: Arc<ReservationService>,
    pub progress: Arc<PhysicalProgressService>,
    pub reports: Arc<ReportService>,
    pub auth: Arc<AuthService>,
}

impl GymServices {
    /// # Examples
    /// ```
    /// use service::{GymServices, Repositories, auth::service::AuthConfig};
    /// let services = GymServices::new(Repositories::in_memory(), AuthConfig { jwt_secret: "s".into(), token_ttl_hours: 1 });
    /// let users = tokio_test::block_on(services.users.list()).unwrap();
    /// assert!(users.is_empty());
    /// ```
    pub fn new(repos: Repositories, auth: AuthConfig) -> Self {
        Self {
            users: Arc::new(UserService::new(repos.users.clone())),
            sessions: Arc::new(GymSessionService::new(repos.sessions.clone(), repos.users.clone())),
            reservations: Arc::new(ReservationService::new(
                repos.reservations.clone(),
                repos.users.clone(),
                repos.sessions.clone(),
            )),
            progress: Arc::new(PhysicalProgressService::new(repos.progress.clone(), repos.users.clone())),
            reports: Arc::new(ReportService::new(repos.reports.clone(), repos.users.clone())),
            auth: Arc::new(AuthService::new(repos.users, auth)),
        }
    }
}

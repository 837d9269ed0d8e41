use std::sync::Arc;

use chrono::{NaiveDateTime, SubsecRound, Utc};
use models::reservation::{self, ReservationStatus};
use tracing::{info, instrument};

use super::domain::{NewReservation, ReservationPatch};
use super::repository::ReservationRepository;
use crate::errors::{require_id, require_text, ServiceError};
use crate::gym_session::repository::GymSessionRepository;
use crate::patch::Patch;
use crate::storage::id_or_generate;
use crate::user::repository::UserRepository;

/// Application service for reservations.
///
/// Creating a reservation does not read or change the session's `current_reservations`;
/// capacity is tracked on the session itself.
pub struct ReservationService {
    repo: Arc<dyn ReservationRepository>,
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn GymSessionRepository>,
}

impl ReservationService {
    pub fn new(
        repo: Arc<dyn ReservationRepository>,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn GymSessionRepository>,
    ) -> Self {
        Self { repo, users, sessions }
    }

    pub async fn list(&self) -> Result<Vec<reservation::Model>, ServiceError> { self.repo.find_all().await }

    pub async fn get(&self, id: &str) -> Result<reservation::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("reservation not found with id: {}", id)))
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<reservation::Model>, ServiceError> {
        self.repo.find_by_user(user_id).await
    }

    pub async fn list_by_session(&self, session_id: &str) -> Result<Vec<reservation::Model>, ServiceError> {
        self.repo.find_by_session(session_id).await
    }

    pub async fn list_by_reservation_date(&self, at: NaiveDateTime) -> Result<Vec<reservation::Model>, ServiceError> {
        self.repo.find_by_reservation_date(at).await
    }

    pub async fn list_by_status(&self, status: ReservationStatus) -> Result<Vec<reservation::Model>, ServiceError> {
        self.repo.find_by_status(status).await
    }

    async fn check_user(&self, user_id: &str) -> Result<(), ServiceError> {
        match self.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(format!("user not found with id: {}", user_id))),
        }
    }

    async fn check_session(&self, session_id: &str) -> Result<(), ServiceError> {
        match self.sessions.find_by_id(session_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(format!("gym session not found with id: {}", session_id))),
        }
    }

    #[instrument(skip(self, input), fields(user_id = ?input.user_id, session_id = ?input.session_id))]
    pub async fn create(&self, input: NewReservation) -> Result<reservation::Model, ServiceError> {
        let user_id = require_text(input.user_id, "user id")?;
        let session_id = require_text(input.session_id, "session id")?;
        self.check_user(&user_id).await?;
        self.check_session(&session_id).await?;

        let id = id_or_generate(input.id);
        if self.repo.find_by_id(&id).await?.is_some() {
            return Err(ServiceError::Duplicate(format!("reservation with id {} already exists", id)));
        }
        let model = reservation::Model {
            id,
            user_id,
            session_id,
            reservation_date: input.reservation_date.unwrap_or_else(|| Utc::now().naive_utc().trunc_subsecs(0)),
            status: input.status.unwrap_or_default(),
        };
        let created = self.repo.insert(model).await?;
        info!(reservation_id = %created.id, status = ?created.status, "reservation_created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(reservation_id = %id))]
    pub async fn update(&self, id: &str, patch: ReservationPatch) -> Result<reservation::Model, ServiceError> {
        let mut current = self.get(id).await?;

        if let Patch::Set(user_id) = patch.user_id {
            let user_id = require_text(Some(user_id), "user id")?;
            if user_id != current.user_id {
                self.check_user(&user_id).await?;
                current.user_id = user_id;
            }
        }
        if let Patch::Set(session_id) = patch.session_id {
            let session_id = require_text(Some(session_id), "session id")?;
            if session_id != current.session_id {
                self.check_session(&session_id).await?;
                current.session_id = session_id;
            }
        }
        patch.reservation_date.apply_to(&mut current.reservation_date);
        patch.status.apply_to(&mut current.status);

        let updated = self.repo.update(current).await?;
        info!(reservation_id = %updated.id, status = ?updated.status, "reservation_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(reservation_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        require_id(id, "reservation")?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("reservation not found with id: {}", id)));
        }
        self.repo.delete_by_id(id).await?;
        info!(reservation_id = %id, "reservation_deleted");
        Ok(())
    }
}

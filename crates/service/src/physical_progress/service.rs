use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use models::physical_progress::{self, Routine};
use tracing::{info, instrument};

use super::domain::{NewPhysicalProgress, PhysicalProgressPatch};
use super::repository::PhysicalProgressRepository;
use crate::errors::{require_id, require_text, ServiceError};
use crate::patch::Patch;
use crate::storage::id_or_generate;
use crate::user::repository::UserRepository;

fn normalize_goal(goal: Option<String>) -> Option<String> {
    goal.map(|g| g.trim().to_string()).filter(|g| !g.is_empty())
}

fn check_routine(routine: Option<&Routine>) -> Result<(), ServiceError> {
    if let Some(r) = routine {
        r.validate()?;
    }
    Ok(())
}

pub struct PhysicalProgressService {
    repo: Arc<dyn PhysicalProgressRepository>,
    users: Arc<dyn UserRepository>,
}

impl PhysicalProgressService {
    pub fn new(repo: Arc<dyn PhysicalProgressRepository>, users: Arc<dyn UserRepository>) -> Self { Self { repo, users } }

    pub async fn list(&self) -> Result<Vec<physical_progress::Model>, ServiceError> { self.repo.find_all().await }

    pub async fn get(&self, id: &str) -> Result<physical_progress::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("physical progress not found with id: {}", id)))
    }

    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<physical_progress::Model>, ServiceError> {
        self.repo.find_by_user(user_id).await
    }

    pub async fn list_by_registration_date(&self, date: NaiveDate) -> Result<Vec<physical_progress::Model>, ServiceError> {
        self.repo.find_by_registration_date(date).await
    }

    pub async fn list_by_user_and_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<physical_progress::Model>, ServiceError> {
        self.repo.find_by_user_and_date(user_id, date).await
    }

    /// Records of one user registered within `[start, end]`, both inclusive.
    pub async fn list_by_user_and_date_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<physical_progress::Model>, ServiceError> {
        if start > end {
            return Err(ServiceError::Validation(format!("start date {start} is after end date {end}")));
        }
        self.repo.find_by_user_and_date_between(user_id, start, end).await
    }

    #[instrument(skip(self, input), fields(user_id = ?input.user_id))]
    pub async fn create(&self, input: NewPhysicalProgress) -> Result<physical_progress::Model, ServiceError> {
        let user_id = require_text(input.user_id, "user id")?;
        check_routine(input.routine.as_ref())?;
        let measurements = input.measurements.unwrap_or_default();
        measurements.validate()?;
        if self.users.find_by_id(&user_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("user not found with id: {}", user_id)));
        }

        let id = id_or_generate(input.id);
        if self.repo.find_by_id(&id).await?.is_some() {
            return Err(ServiceError::Duplicate(format!("physical progress with id {} already exists", id)));
        }
        let model = physical_progress::Model {
            id,
            user_id,
            routine: input.routine,
            measurements,
            goal: normalize_goal(input.goal),
            registration_date: input.registration_date.unwrap_or_else(|| Utc::now().date_naive()),
        };
        let created = self.repo.insert(model).await?;
        info!(progress_id = %created.id, user_id = %created.user_id, "physical_progress_created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(progress_id = %id))]
    pub async fn update(&self, id: &str, patch: PhysicalProgressPatch) -> Result<physical_progress::Model, ServiceError> {
        let mut current = self.get(id).await?;

        if let Patch::Set(routine) = patch.routine {
            check_routine(routine.as_ref())?;
            current.routine = routine;
        }
        if let Patch::Set(changes) = patch.measurements {
            let mut measurements = current.measurements.clone();
            changes.merge_into(&mut measurements);
            measurements.validate()?;
            current.measurements = measurements;
        }
        if let Patch::Set(goal) = patch.goal {
            current.goal = normalize_goal(goal);
        }
        patch.registration_date.apply_to(&mut current.registration_date);

        let updated = self.repo.update(current).await?;
        info!(progress_id = %updated.id, "physical_progress_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(progress_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        require_id(id, "physical progress")?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("physical progress not found with id: {}", id)));
        }
        self.repo.delete_by_id(id).await?;
        info!(progress_id = %id, "physical_progress_deleted");
        Ok(())
    }
}

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use models::gym_session::{self, Attendance};
use models::user;
use tracing::{info, instrument};

use super::domain::{GymSessionPatch, NewGymSession};
use super::repository::GymSessionRepository;
use crate::auth::permissions::{has_permission, Permission};
use crate::errors::{require_id, require_text, ServiceError};
use crate::patch::Patch;
use crate::storage::id_or_generate;
use crate::user::repository::UserRepository;

/// Application service for gym sessions.
///
/// Every stored session keeps `start_time < end_time`, a positive capacity and a reservation
/// count within `[0, capacity]`. Coaches must be existing users allowed to manage sessions.
pub struct GymSessionService {
    repo: Arc<dyn GymSessionRepository>,
    users: Arc<dyn UserRepository>,
}

impl GymSessionService {
    pub fn new(repo: Arc<dyn GymSessionRepository>, users: Arc<dyn UserRepository>) -> Self { Self { repo, users } }

    pub async fn list(&self) -> Result<Vec<gym_session::Model>, ServiceError> { self.repo.find_all().await }

    pub async fn get(&self, id: &str) -> Result<gym_session::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("gym session not found with id: {}", id)))
    }

    pub async fn list_by_coach(&self, coach_id: &str) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.repo.find_by_coach(coach_id).await
    }

    pub async fn list_by_capacity(&self, capacity: i32) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.repo.find_by_capacity(capacity).await
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.repo.find_by_date(date).await
    }

    pub async fn list_by_date_and_start_between(
        &self,
        date: NaiveDate,
        from: NaiveTime,
        to: NaiveTime,
    ) -> Result<Vec<gym_session::Model>, ServiceError> {
        if from > to {
            return Err(ServiceError::Validation(format!("start of range {from} is after its end {to}")));
        }
        self.repo.find_by_date_and_start_between(date, from, to).await
    }

    pub async fn list_by_start_and_end(&self, start: NaiveTime, end: NaiveTime) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.repo.find_by_start_and_end(start, end).await
    }

    pub async fn list_by_end_time(&self, end: NaiveTime) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.repo.find_by_end_time(end).await
    }

    async fn coach(&self, coach_id: &str) -> Result<user::Model, ServiceError> {
        let coach = self
            .users
            .find_by_id(coach_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("coach not found with id: {}", coach_id)))?;
        if !has_permission(coach.role, Permission::ManageSessions) {
            return Err(ServiceError::Validation(format!("user {} with role {} cannot coach sessions", coach.id, coach.role)));
        }
        Ok(coach)
    }

    /// Create a session.
    ///
    /// # Examples
    /// ```
    /// use service::gym_session::{GymSessionService, domain::NewGymSession, repository::memory::InMemoryGymSessionRepository};
    /// use service::user::{UserService, domain::NewUser, repository::memory::InMemoryUserRepository};
    /// use models::user::Role;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use std::sync::Arc;
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let _ = tokio_test::block_on(UserService::new(users.clone()).create(NewUser { id: Some("t1".into()), name: Some("Coach".into()), email: Some("t1@gym.test".into()), role: Some(Role::Trainer), ..Default::default() }));
    /// let svc = GymSessionService::new(Arc::new(InMemoryGymSessionRepository::default()), users);
    /// let session = tokio_test::block_on(svc.create(NewGymSession {
    ///     coach_id: Some("t1".into()),
    ///     date: NaiveDate::from_ymd_opt(2024, 5, 2),
    ///     start_time: NaiveTime::from_hms_opt(9, 0, 0),
    ///     end_time: NaiveTime::from_hms_opt(10, 0, 0),
    ///     capacity: Some(12),
    ///     ..Default::default()
    /// })).unwrap();
    /// assert_eq!(session.current_reservations, 0);
    /// ```
    #[instrument(skip(self, input), fields(coach_id = ?input.coach_id))]
    pub async fn create(&self, input: NewGymSession) -> Result<gym_session::Model, ServiceError> {
        let coach_id = require_text(input.coach_id, "coach id")?;
        let date = input.date.ok_or_else(|| ServiceError::required("session date"))?;
        let start_time = input.start_time.ok_or_else(|| ServiceError::required("start time"))?;
        let end_time = input.end_time.ok_or_else(|| ServiceError::required("end time"))?;
        let capacity = input.capacity.ok_or_else(|| ServiceError::required("capacity"))?;

        let model = gym_session::Model {
            id: id_or_generate(input.id),
            coach_id,
            date,
            start_time,
            end_time,
            capacity,
            current_reservations: input.current_reservations.unwrap_or(0),
            attendance: Attendance(input.attendance.unwrap_or_default()),
        };
        model.validate()?;
        self.coach(&model.coach_id).await?;

        if self.repo.find_by_id(&model.id).await?.is_some() {
            return Err(ServiceError::Duplicate(format!("gym session with id {} already exists", model.id)));
        }
        let created = self.repo.insert(model).await?;
        info!(session_id = %created.id, coach_id = %created.coach_id, "gym_session_created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(session_id = %id))]
    pub async fn update(&self, id: &str, patch: GymSessionPatch) -> Result<gym_session::Model, ServiceError> {
        let mut current = self.get(id).await?;

        if let Patch::Set(coach_id) = patch.coach_id {
            let coach_id = require_text(Some(coach_id), "coach id")?;
            if coach_id != current.coach_id {
                self.coach(&coach_id).await?;
                current.coach_id = coach_id;
            }
        }
        patch.date.apply_to(&mut current.date);
        patch.start_time.apply_to(&mut current.start_time);
        patch.end_time.apply_to(&mut current.end_time);
        patch.capacity.apply_to(&mut current.capacity);
        patch.current_reservations.apply_to(&mut current.current_reservations);
        current.validate()?;

        let updated = self.repo.update(current).await?;
        info!(session_id = %updated.id, "gym_session_updated");
        Ok(updated)
    }

    /// Replace the attendance marks; the list may not be longer than the capacity.
    #[instrument(skip(self, marks), fields(session_id = %id, marks = marks.len()))]
    pub async fn update_attendance(&self, id: &str, marks: Vec<bool>) -> Result<gym_session::Model, ServiceError> {
        let mut current = self.get(id).await?;
        if marks.len() > current.capacity as usize {
            return Err(ServiceError::Validation(format!(
                "attendance has {} marks but capacity is {}",
                marks.len(),
                current.capacity
            )));
        }
        current.attendance = Attendance(marks);
        let updated = self.repo.update(current).await?;
        info!(session_id = %updated.id, present = updated.attendance.present(), "attendance_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(session_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        require_id(id, "gym session")?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("gym session not found with id: {}", id)));
        }
        self.repo.delete_by_id(id).await?;
        info!(session_id = %id, "gym_session_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gym_session::repository::memory::InMemoryGymSessionRepository;
    use crate::user::{domain::NewUser, repository::memory::InMemoryUserRepository, UserService};
    use models::user::Role;

    fn t(h: u32, m: u32) -> NaiveTime { NaiveTime::from_hms_opt(h, m, 0).unwrap() }
    fn d(day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 5, day).unwrap() }

    async fn svc() -> GymSessionService {
        let users = Arc::new(InMemoryUserRepository::default());
        let user_svc = UserService::new(users.clone());
        for (id, role) in [("t1", Role::Trainer), ("t2", Role::Admin), ("s1", Role::Student)] {
            user_svc
                .create(NewUser {
                    id: Some(id.into()),
                    name: Some(id.to_uppercase()),
                    email: Some(format!("{id}@gym.test")),
                    role: Some(role),
                    ..Default::default()
                })
                .await
                .unwrap();
        }
        GymSessionService::new(Arc::new(InMemoryGymSessionRepository::default()), users)
    }

    fn new_session(id: &str, day: u32, start: NaiveTime, end: NaiveTime) -> NewGymSession {
        NewGymSession {
            id: Some(id.into()),
            coach_id: Some("t1".into()),
            date: Some(d(day)),
            start_time: Some(start),
            end_time: Some(end),
            capacity: Some(10),
            current_reservations: None,
            attendance: None,
        }
    }

    #[tokio::test]
    async fn create_copies_fields_and_defaults() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        let s = svc.create(new_session("g1", 2, t(9, 0), t(10, 0))).await?;
        assert_eq!(s.id, "g1");
        assert_eq!(s.coach_id, "t1");
        assert_eq!(s.date, d(2));
        assert_eq!((s.start_time, s.end_time), (t(9, 0), t(10, 0)));
        assert_eq!(s.capacity, 10);
        assert_eq!(s.current_reservations, 0);
        assert!(s.attendance.0.is_empty());

        let generated = svc.create(NewGymSession { id: None, ..new_session("", 2, t(11, 0), t(12, 0)) }).await?;
        assert!(!generated.id.is_empty());
        assert!(matches!(svc.create(new_session("g1", 3, t(9, 0), t(10, 0))).await, Err(ServiceError::Duplicate(_))));
        Ok(())
    }

    #[tokio::test]
    async fn create_enforces_schedule_capacity_and_coach() {
        let svc = svc().await;
        let cases = [
            NewGymSession { coach_id: None, ..new_session("x", 2, t(9, 0), t(10, 0)) },
            NewGymSession { date: None, ..new_session("x", 2, t(9, 0), t(10, 0)) },
            new_session("x", 2, t(10, 0), t(10, 0)),
            new_session("x", 2, t(11, 0), t(10, 0)),
            NewGymSession { capacity: Some(0), ..new_session("x", 2, t(9, 0), t(10, 0)) },
            NewGymSession { current_reservations: Some(11), ..new_session("x", 2, t(9, 0), t(10, 0)) },
            NewGymSession { coach_id: Some("s1".into()), ..new_session("x", 2, t(9, 0), t(10, 0)) },
        ];
        for input in cases {
            let err = svc.create(input).await.unwrap_err();
            assert!(matches!(err, ServiceError::Validation(_) | ServiceError::Model(_)), "unexpected: {err:?}");
        }
        let missing_coach = NewGymSession { coach_id: Some("ghost".into()), ..new_session("x", 2, t(9, 0), t(10, 0)) };
        assert!(matches!(svc.create(missing_coach).await, Err(ServiceError::NotFound(_))));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_and_rechecks() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        svc.create(new_session("g1", 2, t(9, 0), t(10, 0))).await?;

        let moved = svc
            .update("g1", GymSessionPatch { end_time: Patch::Set(t(11, 0)), coach_id: Patch::Set("t2".into()), ..Default::default() })
            .await?;
        assert_eq!(moved.end_time, t(11, 0));
        assert_eq!(moved.start_time, t(9, 0));
        assert_eq!(moved.coach_id, "t2");

        let inverted = svc.update("g1", GymSessionPatch { start_time: Patch::Set(t(12, 0)), ..Default::default() }).await;
        assert!(inverted.is_err());
        let overbooked = svc.update("g1", GymSessionPatch { current_reservations: Patch::Set(20), ..Default::default() }).await;
        assert!(overbooked.is_err());
        assert_eq!(svc.get("g1").await?, moved);

        assert!(matches!(svc.update("nope", GymSessionPatch::default()).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_rejects_blank_coach() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        svc.create(new_session("g1", 2, t(9, 0), t(10, 0))).await?;
        let blank = svc.update("g1", GymSessionPatch { coach_id: Patch::Set(String::new()), ..Default::default() }).await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get("g1").await?.coach_id, "t1");
        Ok(())
    }

    #[tokio::test]
    async fn attendance_is_bounded_by_capacity() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        svc.create(NewGymSession { capacity: Some(3), ..new_session("g1", 2, t(9, 0), t(10, 0)) }).await?;

        let s = svc.update_attendance("g1", vec![true, false, true]).await?;
        assert_eq!(s.attendance.0, vec![true, false, true]);
        assert!(matches!(svc.update_attendance("g1", vec![true; 4]).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.update_attendance("ghost", vec![]).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn time_lookups() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        svc.create(new_session("a", 2, t(8, 0), t(9, 0))).await?;
        svc.create(new_session("b", 2, t(10, 30), t(11, 30))).await?;
        svc.create(new_session("c", 3, t(10, 30), t(11, 30))).await?;
        svc.create(NewGymSession { capacity: Some(25), coach_id: Some("t2".into()), ..new_session("e", 2, t(18, 0), t(19, 0)) }).await?;

        let ids = |v: Vec<gym_session::Model>| v.into_iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids(svc.list_by_date(d(2)).await?), vec!["a", "b", "e"]);
        assert_eq!(ids(svc.list_by_date_and_start_between(d(2), t(8, 0), t(10, 30)).await?), vec!["a", "b"]);
        assert_eq!(ids(svc.list_by_start_and_end(t(10, 30), t(11, 30)).await?), vec!["b", "c"]);
        assert_eq!(ids(svc.list_by_end_time(t(19, 0)).await?), vec!["e"]);
        assert_eq!(ids(svc.list_by_capacity(25).await?), vec!["e"]);
        assert_eq!(ids(svc.list_by_coach("t2").await?), vec!["e"]);
        assert!(matches!(
            svc.list_by_date_and_start_between(d(2), t(12, 0), t(8, 0)).await,
            Err(ServiceError::Validation(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn delete_rules() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        assert!(matches!(svc.delete("").await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.delete("ghost").await, Err(ServiceError::NotFound(_))));
        svc.create(new_session("g1", 2, t(9, 0), t(10, 0))).await?;
        svc.delete("g1").await?;
        assert!(matches!(svc.get("g1").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}

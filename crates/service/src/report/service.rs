use std::sync::Arc;

use chrono::NaiveDate;
use models::report::{self, ReportEntries};
use tracing::{info, instrument};

use super::domain::{NewReport, ReportPatch};
use super::repository::ReportRepository;
use crate::errors::{require_id, require_text, ServiceError};
use crate::patch::Patch;
use crate::storage::id_or_generate;
use crate::user::repository::UserRepository;

pub struct ReportService {
    repo: Arc<dyn ReportRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReportService {
    pub fn new(repo: Arc<dyn ReportRepository>, users: Arc<dyn UserRepository>) -> Self { Self { repo, users } }

    pub async fn list(&self) -> Result<Vec<report::Model>, ServiceError> { self.repo.find_all().await }

    pub async fn get(&self, id: &str) -> Result<report::Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("report not found with id: {}", id)))
    }

    pub async fn list_by_generated_at(&self, date: NaiveDate) -> Result<Vec<report::Model>, ServiceError> {
        self.repo.find_by_generated_at(date).await
    }

    pub async fn list_by_coach(&self, coach_id: &str) -> Result<Vec<report::Model>, ServiceError> {
        self.repo.find_by_coach(coach_id).await
    }

    async fn check_coach(&self, coach_id: &str) -> Result<(), ServiceError> {
        match self.users.find_by_id(coach_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(format!("coach not found with id: {}", coach_id))),
        }
    }

    #[instrument(skip(self, input), fields(coach_id = ?input.coach_id))]
    pub async fn create(&self, input: NewReport) -> Result<report::Model, ServiceError> {
        let coach_id = require_text(input.coach_id, "coach id")?;
        let generated_at = input.generated_at.ok_or_else(|| ServiceError::required("generated at"))?;
        self.check_coach(&coach_id).await?;

        let id = id_or_generate(input.id);
        if self.repo.find_by_id(&id).await?.is_some() {
            return Err(ServiceError::Duplicate(format!("report with id {} already exists", id)));
        }
        let model = report::Model {
            id,
            coach_id,
            description: input.description.unwrap_or_default(),
            generated_at,
            entries: ReportEntries(input.entries.unwrap_or_default()),
        };
        let created = self.repo.insert(model).await?;
        info!(report_id = %created.id, entries = created.entries.0.len(), "report_created");
        Ok(created)
    }

    #[instrument(skip(self, patch), fields(report_id = %id))]
    pub async fn update(&self, id: &str, patch: ReportPatch) -> Result<report::Model, ServiceError> {
        let mut current = self.get(id).await?;

        if let Patch::Set(coach_id) = patch.coach_id {
            let coach_id = require_text(Some(coach_id), "coach id")?;
            if coach_id != current.coach_id {
                self.check_coach(&coach_id).await?;
                current.coach_id = coach_id;
            }
        }
        patch.description.apply_to(&mut current.description);
        patch.generated_at.apply_to(&mut current.generated_at);
        patch.entries.map(ReportEntries).apply_to(&mut current.entries);

        let updated = self.repo.update(current).await?;
        info!(report_id = %updated.id, "report_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(report_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        require_id(id, "report")?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("report not found with id: {}", id)));
        }
        self.repo.delete_by_id(id).await?;
        info!(report_id = %id, "report_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::repository::memory::InMemoryReportRepository;
    use crate::user::repository::memory::InMemoryUserRepository;
    use models::report::ReportEntry;
    use models::user;
    use std::collections::BTreeMap;

    fn d(day: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, day).unwrap() }

    async fn svc() -> ReportService {
        let users = Arc::new(InMemoryUserRepository::default());
        for id in ["t1", "t2"] {
            users
                .insert(user::Model {
                    id: id.into(),
                    name: id.into(),
                    email: format!("{id}@gym.test"),
                    password_hash: None,
                    role: user::Role::Trainer,
                    registration_date: d(1),
                })
                .await
                .unwrap();
        }
        ReportService::new(Arc::new(InMemoryReportRepository::default()), users)
    }

    fn entry(label: &str, attendance: i64) -> ReportEntry {
        let mut metrics = BTreeMap::new();
        metrics.insert("attendance".to_string(), serde_json::json!(attendance));
        ReportEntry { session: label.into(), metrics }
    }

    fn new_report(id: &str, coach: &str, day: u32) -> NewReport {
        NewReport {
            id: Some(id.into()),
            coach_id: Some(coach.into()),
            description: Some("weekly summary".into()),
            generated_at: Some(d(day)),
            entries: Some(vec![entry("Session 1", 8)]),
        }
    }

    #[tokio::test]
    async fn create_and_lookups() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        let r = svc.create(new_report("r1", "t1", 10)).await?;
        assert_eq!(r.description, "weekly summary");
        assert_eq!(r.entries.0[0].metrics["attendance"], 8);
        svc.create(new_report("r2", "t2", 10)).await?;
        svc.create(new_report("r3", "t2", 11)).await?;

        assert_eq!(svc.list_by_generated_at(d(10)).await?.len(), 2);
        assert_eq!(svc.list_by_coach("t2").await?.len(), 2);
        assert_eq!(svc.list().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_coach_and_date() {
        let svc = svc().await;
        assert!(matches!(svc.create(NewReport { coach_id: None, ..new_report("x", "t1", 1) }).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.create(NewReport { generated_at: None, ..new_report("x", "t1", 1) }).await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.create(new_report("x", "ghost", 1)).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_merges_fields() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        svc.create(new_report("r1", "t1", 10)).await?;

        let r = svc
            .update("r1", ReportPatch { entries: Patch::Set(vec![entry("A", 1), entry("B", 2)]), ..Default::default() })
            .await?;
        assert_eq!(r.entries.0.len(), 2);
        assert_eq!(r.description, "weekly summary");

        let r = svc.update("r1", ReportPatch { coach_id: Patch::Set("t2".into()), ..Default::default() }).await?;
        assert_eq!(r.coach_id, "t2");
        let ghost = svc.update("r1", ReportPatch { coach_id: Patch::Set("ghost".into()), ..Default::default() }).await;
        assert!(matches!(ghost, Err(ServiceError::NotFound(_))));
        let blank = svc.update("r1", ReportPatch { coach_id: Patch::Set(String::new()), ..Default::default() }).await;
        assert!(matches!(blank, Err(ServiceError::Validation(_))));
        assert_eq!(svc.get("r1").await?.coach_id, "t2");
        Ok(())
    }

    #[tokio::test]
    async fn delete_rules() -> Result<(), anyhow::Error> {
        let svc = svc().await;
        assert!(matches!(svc.delete("").await, Err(ServiceError::Validation(_))));
        assert!(matches!(svc.delete("ghost").await, Err(ServiceError::NotFound(_))));
        svc.create(new_report("r1", "t1", 10)).await?;
        svc.delete("r1").await?;
        assert!(svc.list().await?.is_empty());
        Ok(())
    }
}

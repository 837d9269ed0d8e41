use async_trait::async_trait;
use chrono::NaiveDate;
use models::report;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<report::Model>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<report::Model>, ServiceError>;
    async fn find_by_generated_at(&self, date: NaiveDate) -> Result<Vec<report::Model>, ServiceError>;
    async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<report::Model>, ServiceError>;
    async fn insert(&self, report: report::Model) -> Result<report::Model, ServiceError>;
    async fn update(&self, report: report::Model) -> Result<report::Model, ServiceError>;
    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError>;
}

pub struct SeaOrmReportRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ReportRepository for SeaOrmReportRepository {
    async fn find_all(&self) -> Result<Vec<report::Model>, ServiceError> {
        report::Entity::find()
            .order_by_asc(report::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<report::Model>, ServiceError> {
        report::Entity::find_by_id(id.to_string()).one(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn find_by_generated_at(&self, date: NaiveDate) -> Result<Vec<report::Model>, ServiceError> {
        report::Entity::find()
            .filter(report::Column::GeneratedAt.eq(date))
            .order_by_asc(report::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<report::Model>, ServiceError> {
        report::Entity::find()
            .filter(report::Column::CoachId.eq(coach_id))
            .order_by_asc(report::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn insert(&self, report: report::Model) -> Result<report::Model, ServiceError> {
        report.into_active_model().reset_all().insert(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn update(&self, report: report::Model) -> Result<report::Model, ServiceError> {
        report.into_active_model().reset_all().update(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        let res = report::Entity::delete_by_id(id.to_string()).exec(&self.db).await.map_err(ServiceError::from_db)?;
        Ok(res.rows_affected > 0)
    }
}

pub mod memory {
    use super::*;
    use crate::storage::MemoryCollection;

    pub struct InMemoryReportRepository {
        reports: MemoryCollection<report::Model>,
    }

    impl Default for InMemoryReportRepository {
        fn default() -> Self { Self { reports: MemoryCollection::new("report") } }
    }

    #[async_trait]
    impl ReportRepository for InMemoryReportRepository {
        async fn find_all(&self) -> Result<Vec<report::Model>, ServiceError> {
            Ok(self.reports.list().await)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<report::Model>, ServiceError> {
            Ok(self.reports.get(id).await)
        }

        async fn find_by_generated_at(&self, date: NaiveDate) -> Result<Vec<report::Model>, ServiceError> {
            Ok(self.reports.filter(|r| r.generated_at == date).await)
        }

        async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<report::Model>, ServiceError> {
            Ok(self.reports.filter(|r| r.coach_id == coach_id).await)
        }

        async fn insert(&self, report: report::Model) -> Result<report::Model, ServiceError> {
            self.reports.insert(report.id.clone(), report).await
        }

        async fn update(&self, report: report::Model) -> Result<report::Model, ServiceError> {
            let id = report.id.clone();
            self.reports.replace(&id, report).await
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
            Ok(self.reports.remove(id).await)
        }
    }
}

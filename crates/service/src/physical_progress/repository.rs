use async_trait::async_trait;
use chrono::NaiveDate;
use models::physical_progress;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;

#[async_trait]
pub trait PhysicalProgressRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<physical_progress::Model>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<physical_progress::Model>, ServiceError>;
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<physical_progress::Model>, ServiceError>;
    async fn find_by_registration_date(&self, date: NaiveDate) -> Result<Vec<physical_progress::Model>, ServiceError>;
    async fn find_by_user_and_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<physical_progress::Model>, ServiceError>;
    /// Records of `user_id` registered within `[start, end]`.
    async fn find_by_user_and_date_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<physical_progress::Model>, ServiceError>;
    async fn insert(&self, progress: physical_progress::Model) -> Result<physical_progress::Model, ServiceError>;
    async fn update(&self, progress: physical_progress::Model) -> Result<physical_progress::Model, ServiceError>;
    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError>;
}

pub struct SeaOrmPhysicalProgressRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPhysicalProgressRepository {
    async fn filtered<F>(&self, filter: F) -> Result<Vec<physical_progress::Model>, ServiceError>
    where
        F: sea_orm::sea_query::IntoCondition + Send,
    {
        physical_progress::Entity::find()
            .filter(filter)
            .order_by_asc(physical_progress::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }
}

#[async_trait]
impl PhysicalProgressRepository for SeaOrmPhysicalProgressRepository {
    async fn find_all(&self) -> Result<Vec<physical_progress::Model>, ServiceError> {
        physical_progress::Entity::find()
            .order_by_asc(physical_progress::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<physical_progress::Model>, ServiceError> {
        physical_progress::Entity::find_by_id(id.to_string()).one(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<physical_progress::Model>, ServiceError> {
        self.filtered(physical_progress::Column::UserId.eq(user_id)).await
    }

    async fn find_by_registration_date(&self, date: NaiveDate) -> Result<Vec<physical_progress::Model>, ServiceError> {
        self.filtered(physical_progress::Column::RegistrationDate.eq(date)).await
    }

    async fn find_by_user_and_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<physical_progress::Model>, ServiceError> {
        self.filtered(
            physical_progress::Column::UserId
                .eq(user_id)
                .and(physical_progress::Column::RegistrationDate.eq(date)),
        )
        .await
    }

    async fn find_by_user_and_date_between(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<physical_progress::Model>, ServiceError> {
        self.filtered(
            physical_progress::Column::UserId
                .eq(user_id)
                .and(physical_progress::Column::RegistrationDate.between(start, end)),
        )
        .await
    }

    async fn insert(&self, progress: physical_progress::Model) -> Result<physical_progress::Model, ServiceError> {
        progress.into_active_model().reset_all().insert(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn update(&self, progress: physical_progress::Model) -> Result<physical_progress::Model, ServiceError> {
        progress.into_active_model().reset_all().update(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        let res = physical_progress::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(ServiceError::from_db)?;
        Ok(res.rows_affected > 0)
    }
}

pub mod memory {
    use super::*;
    use crate::storage::MemoryCollection;

    pub struct InMemoryPhysicalProgressRepository {
        records: MemoryCollection<physical_progress::Model>,
    }

    impl Default for InMemoryPhysicalProgressRepository {
        fn default() -> Self { Self { records: MemoryCollection::new("physical progress") } }
    }

    #[async_trait]
    impl PhysicalProgressRepository for InMemoryPhysicalProgressRepository {
        async fn find_all(&self) -> Result<Vec<physical_progress::Model>, ServiceError> {
            Ok(self.records.list().await)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<physical_progress::Model>, ServiceError> {
            Ok(self.records.get(id).await)
        }

        async fn find_by_user(&self, user_id: &str) -> Result<Vec<physical_progress::Model>, ServiceError> {
            Ok(self.records.filter(|p| p.user_id == user_id).await)
        }

        async fn find_by_registration_date(&self, date: NaiveDate) -> Result<Vec<physical_progress::Model>, ServiceError> {
            Ok(self.records.filter(|p| p.registration_date == date).await)
        }

        async fn find_by_user_and_date(&self, user_id: &str, date: NaiveDate) -> Result<Vec<physical_progress::Model>, ServiceError> {
            Ok(self.records.filter(|p| p.user_id == user_id && p.registration_date == date).await)
        }

        async fn find_by_user_and_date_between(
            &self,
            user_id: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<physical_progress::Model>, ServiceError> {
            Ok(self
                .records
                .filter(|p| p.user_id == user_id && (start..=end).contains(&p.registration_date))
                .await)
        }

        async fn insert(&self, progress: physical_progress::Model) -> Result<physical_progress::Model, ServiceError> {
            self.records.insert(progress.id.clone(), progress).await
        }

        async fn update(&self, progress: physical_progress::Model) -> Result<physical_progress::Model, ServiceError> {
            let id = progress.id.clone();
            self.records.replace(&id, progress).await
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
            Ok(self.records.remove(id).await)
        }
    }
}

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use models::gym_session;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;

#[async_trait]
pub trait GymSessionRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<gym_session::Model>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<gym_session::Model>, ServiceError>;
    async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<gym_session::Model>, ServiceError>;
    async fn find_by_capacity(&self, capacity: i32) -> Result<Vec<gym_session::Model>, ServiceError>;
    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<gym_session::Model>, ServiceError>;
    /// Sessions on `date` whose start time lies in `[from, to]`.
    async fn find_by_date_and_start_between(
        &self,
        date: NaiveDate,
        from: NaiveTime,
        to: NaiveTime,
    ) -> Result<Vec<gym_session::Model>, ServiceError>;
    async fn find_by_start_and_end(&self, start: NaiveTime, end: NaiveTime) -> Result<Vec<gym_session::Model>, ServiceError>;
    async fn find_by_end_time(&self, end: NaiveTime) -> Result<Vec<gym_session::Model>, ServiceError>;
    async fn insert(&self, session: gym_session::Model) -> Result<gym_session::Model, ServiceError>;
    async fn update(&self, session: gym_session::Model) -> Result<gym_session::Model, ServiceError>;
    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError>;
}

pub struct SeaOrmGymSessionRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmGymSessionRepository {
    async fn filtered<F>(&self, filter: F) -> Result<Vec<gym_session::Model>, ServiceError>
    where
        F: sea_orm::sea_query::IntoCondition + Send,
    {
        gym_session::Entity::find()
            .filter(filter)
            .order_by_asc(gym_session::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }
}

#[async_trait]
impl GymSessionRepository for SeaOrmGymSessionRepository {
    async fn find_all(&self) -> Result<Vec<gym_session::Model>, ServiceError> {
        gym_session::Entity::find()
            .order_by_asc(gym_session::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<gym_session::Model>, ServiceError> {
        gym_session::Entity::find_by_id(id.to_string()).one(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.filtered(gym_session::Column::CoachId.eq(coach_id)).await
    }

    async fn find_by_capacity(&self, capacity: i32) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.filtered(gym_session::Column::Capacity.eq(capacity)).await
    }

    async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.filtered(gym_session::Column::Date.eq(date)).await
    }

    async fn find_by_date_and_start_between(
        &self,
        date: NaiveDate,
        from: NaiveTime,
        to: NaiveTime,
    ) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.filtered(
            gym_session::Column::Date
                .eq(date)
                .and(gym_session::Column::StartTime.between(from, to)),
        )
        .await
    }

    async fn find_by_start_and_end(&self, start: NaiveTime, end: NaiveTime) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.filtered(
            gym_session::Column::StartTime
                .eq(start)
                .and(gym_session::Column::EndTime.eq(end)),
        )
        .await
    }

    async fn find_by_end_time(&self, end: NaiveTime) -> Result<Vec<gym_session::Model>, ServiceError> {
        self.filtered(gym_session::Column::EndTime.eq(end)).await
    }

    async fn insert(&self, session: gym_session::Model) -> Result<gym_session::Model, ServiceError> {
        session.into_active_model().reset_all().insert(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn update(&self, session: gym_session::Model) -> Result<gym_session::Model, ServiceError> {
        session.into_active_model().reset_all().update(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        let res = gym_session::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(ServiceError::from_db)?;
        Ok(res.rows_affected > 0)
    }
}

pub mod memory {
    use super::*;
    use crate::storage::MemoryCollection;

    pub struct InMemoryGymSessionRepository {
        sessions: MemoryCollection<gym_session::Model>,
    }

    impl Default for InMemoryGymSessionRepository {
        fn default() -> Self { Self { sessions: MemoryCollection::new("gym session") } }
    }

    #[async_trait]
    impl GymSessionRepository for InMemoryGymSessionRepository {
        async fn find_all(&self) -> Result<Vec<gym_session::Model>, ServiceError> {
            Ok(self.sessions.list().await)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<gym_session::Model>, ServiceError> {
            Ok(self.sessions.get(id).await)
        }

        async fn find_by_coach(&self, coach_id: &str) -> Result<Vec<gym_session::Model>, ServiceError> {
            Ok(self.sessions.filter(|s| s.coach_id == coach_id).await)
        }

        async fn find_by_capacity(&self, capacity: i32) -> Result<Vec<gym_session::Model>, ServiceError> {
            Ok(self.sessions.filter(|s| s.capacity == capacity).await)
        }

        async fn find_by_date(&self, date: NaiveDate) -> Result<Vec<gym_session::Model>, ServiceError> {
            Ok(self.sessions.filter(|s| s.date == date).await)
        }

        async fn find_by_date_and_start_between(
            &self,
            date: NaiveDate,
            from: NaiveTime,
            to: NaiveTime,
        ) -> Result<Vec<gym_session::Model>, ServiceError> {
            Ok(self
                .sessions
                .filter(|s| s.date == date && (from..=to).contains(&s.start_time))
                .await)
        }

        async fn find_by_start_and_end(&self, start: NaiveTime, end: NaiveTime) -> Result<Vec<gym_session::Model>, ServiceError> {
            Ok(self.sessions.filter(|s| s.start_time == start && s.end_time == end).await)
        }

        async fn find_by_end_time(&self, end: NaiveTime) -> Result<Vec<gym_session::Model>, ServiceError> {
            Ok(self.sessions.filter(|s| s.end_time == end).await)
        }

        async fn insert(&self, session: gym_session::Model) -> Result<gym_session::Model, ServiceError> {
            self.sessions.insert(session.id.clone(), session).await
        }

        async fn update(&self, session: gym_session::Model) -> Result<gym_session::Model, ServiceError> {
            let id = session.id.clone();
            self.sessions.replace(&id, session).await
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
            Ok(self.sessions.remove(id).await)
        }
    }
}

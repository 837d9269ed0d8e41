use async_trait::async_trait;
use chrono::NaiveDateTime;
use models::reservation::{self, ReservationStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<reservation::Model>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<reservation::Model>, ServiceError>;
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<reservation::Model>, ServiceError>;
    async fn find_by_session(&self, session_id: &str) -> Result<Vec<reservation::Model>, ServiceError>;
    async fn find_by_reservation_date(&self, at: NaiveDateTime) -> Result<Vec<reservation::Model>, ServiceError>;
    async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<reservation::Model>, ServiceError>;
    async fn insert(&self, reservation: reservation::Model) -> Result<reservation::Model, ServiceError>;
    async fn update(&self, reservation: reservation::Model) -> Result<reservation::Model, ServiceError>;
    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError>;
}

pub struct SeaOrmReservationRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    async fn filtered<F>(&self, filter: F) -> Result<Vec<reservation::Model>, ServiceError>
    where
        F: sea_orm::sea_query::IntoCondition + Send,
    {
        reservation::Entity::find()
            .filter(filter)
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }
}

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn find_all(&self) -> Result<Vec<reservation::Model>, ServiceError> {
        reservation::Entity::find()
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<reservation::Model>, ServiceError> {
        reservation::Entity::find_by_id(id.to_string()).one(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Vec<reservation::Model>, ServiceError> {
        self.filtered(reservation::Column::UserId.eq(user_id)).await
    }

    async fn find_by_session(&self, session_id: &str) -> Result<Vec<reservation::Model>, ServiceError> {
        self.filtered(reservation::Column::SessionId.eq(session_id)).await
    }

    async fn find_by_reservation_date(&self, at: NaiveDateTime) -> Result<Vec<reservation::Model>, ServiceError> {
        self.filtered(reservation::Column::ReservationDate.eq(at)).await
    }

    async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<reservation::Model>, ServiceError> {
        self.filtered(reservation::Column::Status.eq(status)).await
    }

    async fn insert(&self, reservation: reservation::Model) -> Result<reservation::Model, ServiceError> {
        reservation.into_active_model().reset_all().insert(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn update(&self, reservation: reservation::Model) -> Result<reservation::Model, ServiceError> {
        reservation.into_active_model().reset_all().update(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        let res = reservation::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(ServiceError::from_db)?;
        Ok(res.rows_affected > 0)
    }
}

pub mod memory {
    use super::*;
    use crate::storage::MemoryCollection;

    pub struct InMemoryReservationRepository {
        reservations: MemoryCollection<reservation::Model>,
    }

    impl Default for InMemoryReservationRepository {
        fn default() -> Self { Self { reservations: MemoryCollection::new("reservation") } }
    }

    #[async_trait]
    impl ReservationRepository for InMemoryReservationRepository {
        async fn find_all(&self) -> Result<Vec<reservation::Model>, ServiceError> {
            Ok(self.reservations.list().await)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<reservation::Model>, ServiceError> {
            Ok(self.reservations.get(id).await)
        }

        async fn find_by_user(&self, user_id: &str) -> Result<Vec<reservation::Model>, ServiceError> {
            Ok(self.reservations.filter(|r| r.user_id == user_id).await)
        }

        async fn find_by_session(&self, session_id: &str) -> Result<Vec<reservation::Model>, ServiceError> {
            Ok(self.reservations.filter(|r| r.session_id == session_id).await)
        }

        async fn find_by_reservation_date(&self, at: NaiveDateTime) -> Result<Vec<reservation::Model>, ServiceError> {
            Ok(self.reservations.filter(|r| r.reservation_date == at).await)
        }

        async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<reservation::Model>, ServiceError> {
            Ok(self.reservations.filter(|r| r.status == status).await)
        }

        async fn insert(&self, reservation: reservation::Model) -> Result<reservation::Model, ServiceError> {
            self.reservations.insert(reservation.id.clone(), reservation).await
        }

        async fn update(&self, reservation: reservation::Model) -> Result<reservation::Model, ServiceError> {
            let id = reservation.id.clone();
            self.reservations.replace(&id, reservation).await
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
            Ok(self.reservations.remove(id).await)
        }
    }
}

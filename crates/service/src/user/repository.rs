use async_trait::async_trait;
use chrono::NaiveDate;
use models::user::{self, Role};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
};

use crate::errors::ServiceError;

/// Query interface over the user collection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Vec<user::Model>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError>;
    async fn find_by_role(&self, role: Role) -> Result<Vec<user::Model>, ServiceError>;
    async fn find_by_registration_date(&self, date: NaiveDate) -> Result<Vec<user::Model>, ServiceError>;
    /// Insert a new user; id or email collisions fail with `Duplicate`.
    async fn insert(&self, user: user::Model) -> Result<user::Model, ServiceError>;
    /// Overwrite an existing user; an email owned by another user fails with `Duplicate`.
    async fn update(&self, user: user::Model) -> Result<user::Model, ServiceError>;
    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find_by_id(id.to_string()).one(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Name.eq(name))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_role(&self, role: Role) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Role.eq(role))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn find_by_registration_date(&self, date: NaiveDate) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::RegistrationDate.eq(date))
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(ServiceError::from_db)
    }

    async fn insert(&self, user: user::Model) -> Result<user::Model, ServiceError> {
        user.into_active_model().reset_all().insert(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn update(&self, user: user::Model) -> Result<user::Model, ServiceError> {
        user.into_active_model().reset_all().update(&self.db).await.map_err(ServiceError::from_db)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        let res = user::Entity::delete_by_id(id.to_string()).exec(&self.db).await.map_err(ServiceError::from_db)?;
        Ok(res.rows_affected > 0)
    }
}

/// In-memory repository for tests and `STORE=memory` runs.
pub mod memory {
    use super::*;
    use crate::storage::MemoryCollection;

    pub struct InMemoryUserRepository {
        users: MemoryCollection<user::Model>,
    }

    impl Default for InMemoryUserRepository {
        fn default() -> Self { Self { users: MemoryCollection::new("user") } }
    }

    fn same_email(a: &user::Model, b: &user::Model) -> bool {
        a.email == b.email
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_all(&self) -> Result<Vec<user::Model>, ServiceError> {
            Ok(self.users.list().await)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.users.get(id).await)
        }

        async fn find_by_name(&self, name: &str) -> Result<Vec<user::Model>, ServiceError> {
            Ok(self.users.filter(|u| u.name == name).await)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
            Ok(self.users.find(|u| u.email == email).await)
        }

        async fn find_by_role(&self, role: Role) -> Result<Vec<user::Model>, ServiceError> {
            Ok(self.users.filter(|u| u.role == role).await)
        }

        async fn find_by_registration_date(&self, date: NaiveDate) -> Result<Vec<user::Model>, ServiceError> {
            Ok(self.users.filter(|u| u.registration_date == date).await)
        }

        async fn insert(&self, user: user::Model) -> Result<user::Model, ServiceError> {
            self.users.insert_unique(user.id.clone(), user, same_email).await
        }

        async fn update(&self, user: user::Model) -> Result<user::Model, ServiceError> {
            let id = user.id.clone();
            self.users.replace_unique(&id, user, same_email).await
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
            Ok(self.users.remove(id).await)
        }
    }
}

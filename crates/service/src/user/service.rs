use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use models::user::{self, Role};
use tracing::{debug, info, instrument};

use super::domain::{NewUser, UserPatch};
use super::repository::UserRepository;
use crate::auth::{errors::AuthError, password};
use crate::errors::{require_id, require_text, ServiceError};
use crate::patch::Patch;

fn hash(plain: &str) -> Result<String, ServiceError> {
    password::hash_password(plain).map_err(|e| match e {
        AuthError::Validation(msg) => ServiceError::Validation(msg),
        other => ServiceError::Internal(other.to_string()),
    })
}

/// Application service for users: required fields, email uniqueness, not-found handling.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> { self.repo.find_all().await }

    pub async fn get(&self, id: &str) -> Result<user::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("user"))
    }

    pub async fn list_by_name(&self, name: &str) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.find_by_name(name).await
    }

    pub async fn get_by_email(&self, email: &str) -> Result<user::Model, ServiceError> {
        self.repo.find_by_email(email).await?.ok_or_else(|| ServiceError::not_found("user"))
    }

    pub async fn list_by_role(&self, role: Role) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.find_by_role(role).await
    }

    pub async fn list_by_registration_date(&self, date: NaiveDate) -> Result<Vec<user::Model>, ServiceError> {
        self.repo.find_by_registration_date(date).await
    }

    /// Create a user from caller-supplied fields.
    ///
    /// # Examples
    /// ```
    /// use service::user::{UserService, domain::NewUser, repository::memory::InMemoryUserRepository};
    /// use models::user::Role;
    /// use std::sync::Arc;
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::default()));
    /// let input = NewUser { id: Some("u1".into()), name: Some("Ana".into()), email: Some("a@x.com".into()), role: Some(Role::Student), ..Default::default() };
    /// let user = tokio_test::block_on(svc.create(input)).unwrap();
    /// assert_eq!(user.email, "a@x.com");
    /// ```
    #[instrument(skip(self, input), fields(user_id = ?input.id, email = ?input.email))]
    pub async fn create(&self, input: NewUser) -> Result<user::Model, ServiceError> {
        let id = require_text(input.id, "user id")?;
        let name = require_text(input.name, "user name")?;
        let email = require_text(input.email, "user email")?;
        let role = input.role.ok_or_else(|| ServiceError::Validation("user role cannot be null".into()))?;
        user::validate_name(&name)?;
        user::validate_email(&email)?;

        if self.repo.find_by_id(&id).await?.is_some() {
            return Err(ServiceError::Duplicate(format!("user with id {} already exists", id)));
        }
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            debug!(owner = %existing.id, "email already registered");
            return Err(ServiceError::Duplicate(format!("email {} is already registered", email)));
        }

        let password_hash = input.password.as_deref().map(hash).transpose()?;

        let model = user::Model {
            id,
            name,
            email,
            password_hash,
            role,
            registration_date: input.registration_date.unwrap_or_else(|| Utc::now().date_naive()),
        };
        let created = self.repo.insert(model).await?;
        info!(user_id = %created.id, role = %created.role, "user_created");
        Ok(created)
    }

    /// Merge the present patch fields into the stored user.
    ///
    /// Changing the email to one owned by another user fails with `Duplicate`; re-sending the
    /// current email is accepted without a lookup.
    #[instrument(skip(self, patch), fields(user_id = %id))]
    pub async fn update(&self, id: &str, patch: UserPatch) -> Result<user::Model, ServiceError> {
        let mut current = self.get(id).await?;

        if let Patch::Set(name) = patch.name {
            user::validate_name(&name)?;
            current.name = name;
        }
        if let Patch::Set(email) = patch.email {
            if email != current.email {
                user::validate_email(&email)?;
                if self.repo.find_by_email(&email).await?.is_some() {
                    return Err(ServiceError::Duplicate(format!("email {} is already registered", email)));
                }
                current.email = email;
            }
        }
        if let Patch::Set(plain) = patch.password {
            current.password_hash = Some(hash(&plain)?);
        }
        patch.role.apply_to(&mut current.role);

        let updated = self.repo.update(current).await?;
        info!(user_id = %updated.id, "user_updated");
        Ok(updated)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        require_id(id, "user")?;
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("user not found with id: {}", id)));
        }
        self.repo.delete_by_id(id).await?;
        info!(user_id = %id, "user_deleted");
        Ok(())
    }

    /// Create an `ADMIN` account for `email` unless a user with that email already exists.
    pub async fn ensure_admin(&self, email: &str, plain_password: &str) -> Result<user::Model, ServiceError> {
        if let Some(existing) = self.repo.find_by_email(email).await? {
            debug!(user_id = %existing.id, "bootstrap admin already present");
            return Ok(existing);
        }
        self.create(NewUser {
            id: Some(uuid::Uuid::new_v4().to_string()),
            name: Some("Administrator".into()),
            email: Some(email.to_string()),
            password: Some(plain_password.to_string()),
            role: Some(Role::Admin),
            registration_date: None,
        })
        .await
    }
}

use std::sync::Arc;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, AuthUser, Claims, LoginInput};
use super::errors::AuthError;
use super::password;
use super::permissions::Scope;
use crate::user::repository::UserRepository;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Auth business service independent of web framework
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, cfg: AuthConfig) -> Self { Self { users, cfg } }

    /// Authenticate a user by email and password and issue a bearer token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, domain::LoginInput};
    /// use service::user::{UserService, domain::NewUser, repository::memory::InMemoryUserRepository};
    /// use models::user::Role;
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryUserRepository::default());
    /// let users = UserService::new(repo.clone());
    /// let _ = tokio_test::block_on(users.create(NewUser { id: Some("t1".into()), name: Some("Coach".into()), email: Some("c@gym.test".into()), password: Some("Passw0rd".into()), role: Some(Role::Trainer), ..Default::default() }));
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 1 });
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "c@gym.test".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.role, Role::Trainer);
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self.users
            .find_by_email(input.email.trim())
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let Some(hash) = user.password_hash.as_deref() else {
            debug!(user_id = %user.id, "user has no password set");
            return Err(AuthError::Unauthorized);
        };
        if !password::verify_password(&input.password, hash)? {
            return Err(AuthError::Unauthorized);
        }

        let user = AuthUser::from(user);
        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, role = %user.role, "user_logged_in");
        Ok(AuthSession { user, token })
    }

    pub fn issue_token(&self, user: &AuthUser) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let exp = (now + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode and validate signature and expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Resolve a bearer token into claims allowed to enter `scope`.
    pub fn authorize(&self, token: Option<&str>, scope: Scope) -> Result<Claims, AuthError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(AuthError::MissingToken)?;
        let claims = self.verify_token(token)?;
        if let Some(missing) = scope.missing_for(claims.role) {
            return Err(AuthError::Forbidden { role: claims.role.to_string(), permission: missing.to_string() });
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{domain::NewUser, repository::memory::InMemoryUserRepository, UserService};
    use models::user::Role;

    async fn setup() -> AuthService {
        let repo = Arc::new(InMemoryUserRepository::default());
        let users = UserService::new(repo.clone());
        users
            .create(NewUser {
                id: Some("s1".into()),
                name: Some("Student".into()),
                email: Some("s@gym.test".into()),
                password: Some("Passw0rd".into()),
                role: Some(Role::Student),
                ..Default::default()
            })
            .await
            .unwrap();
        users
            .create(NewUser {
                id: Some("nopass".into()),
                name: Some("No Pass".into()),
                email: Some("np@gym.test".into()),
                role: Some(Role::Student),
                ..Default::default()
            })
            .await
            .unwrap();
        AuthService::new(repo, AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 })
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let svc = setup().await;
        let session = svc.login(LoginInput { email: "s@gym.test".into(), password: "Passw0rd".into() }).await.unwrap();
        let claims = svc.verify_token(&session.token).unwrap();
        assert_eq!(claims.sub, "s1");
        assert_eq!(claims.role, Role::Student);
        assert!(claims.exp > claims.iat);
    }

    #[tokio::test]
    async fn login_failures_are_unauthorized() {
        let svc = setup().await;
        let wrong = svc.login(LoginInput { email: "s@gym.test".into(), password: "nope-nope".into() }).await;
        assert!(matches!(wrong, Err(AuthError::Unauthorized)));
        let unknown = svc.login(LoginInput { email: "x@gym.test".into(), password: "Passw0rd".into() }).await;
        assert!(matches!(unknown, Err(AuthError::Unauthorized)));
        let no_password = svc.login(LoginInput { email: "np@gym.test".into(), password: "Passw0rd".into() }).await;
        assert!(matches!(no_password, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn authorize_checks_token_and_scope() {
        let svc = setup().await;
        let session = svc.login(LoginInput { email: "s@gym.test".into(), password: "Passw0rd".into() }).await.unwrap();

        assert!(svc.authorize(Some(&session.token), Scope::User).is_ok());
        assert!(matches!(svc.authorize(Some(&session.token), Scope::Trainer), Err(AuthError::Forbidden { .. })));
        assert!(matches!(svc.authorize(None, Scope::User), Err(AuthError::MissingToken)));
        assert!(matches!(svc.authorize(Some("garbage"), Scope::User), Err(AuthError::TokenError(_))));

        let other = AuthService::new(Arc::new(InMemoryUserRepository::default()), AuthConfig { jwt_secret: "other".into(), token_ttl_hours: 1 });
        assert!(matches!(other.verify_token(&session.token), Err(AuthError::TokenError(_))));
    }
}

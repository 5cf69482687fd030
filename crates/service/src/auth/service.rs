use std::sync::Arc;
use std::time::Duration;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::Algorithm;
use rand::rngs::OsRng;
use tracing::{info, debug, instrument};

use super::domain::{RegisterInput, LoginInput, Principal, AuthSession};
use super::errors::AuthError;
use super::guard::AccessGuard;
use super::repository::PrincipalRepository;
use super::session::SessionIssuer;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// Auth business service independent of web framework
pub struct AuthService<R: PrincipalRepository> {
    repo: Arc<R>,
    issuer: SessionIssuer,
    guard: AccessGuard,
}

impl<R: PrincipalRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        let issuer = SessionIssuer::new(cfg.clone());
        let guard = AccessGuard::new(cfg);
        Self { repo, issuer, guard }
    }

    pub fn issuer(&self) -> &SessionIssuer {
        &self.issuer
    }

    /// Register a new owner with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService};
    /// use service::auth::repository::mock::MockPrincipalRepository;
    /// use service::auth::domain::RegisterInput;
    /// use std::{sync::Arc, time::Duration};
    /// let repo = Arc::new(MockPrincipalRepository::default());
    /// let cfg = AuthConfig {
    ///     secret: "secret".into(),
    ///     algorithm: jsonwebtoken::Algorithm::HS256,
    ///     access_ttl: Duration::from_secs(900),
    ///     refresh_ttl: Duration::from_secs(604_800),
    /// };
    /// let svc = AuthService::new(repo, cfg);
    /// let input = RegisterInput { name: "Test".into(), email: "user@example.com".into(), phone: None, password: "Secret123".into() };
    /// let owner = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(owner.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<Principal, AuthError> {
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_by_email(&input.email).await? {
            debug!("owner exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let owner = self
            .repo
            .create_owner(&input.name, &input.email, input.phone.as_deref(), &hash)
            .await?;
        info!(owner_id = owner.id, email = %owner.email, "owner_registered");
        Ok(owner)
    }

    /// Authenticate an owner and issue an access/refresh pair.
    ///
    /// Unknown email and wrong password come back as the same
    /// `InvalidCredentials` value.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthConfig, AuthService};
    /// use service::auth::repository::mock::MockPrincipalRepository;
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::{sync::Arc, time::Duration};
    /// let repo = Arc::new(MockPrincipalRepository::default());
    /// let cfg = AuthConfig {
    ///     secret: "secret".into(),
    ///     algorithm: jsonwebtoken::Algorithm::HS256,
    ///     access_ttl: Duration::from_secs(900),
    ///     refresh_ttl: Duration::from_secs(604_800),
    /// };
    /// let svc = AuthService::new(repo, cfg);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), email: "u@e.com".into(), phone: None, password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.owner.email, "u@e.com");
    /// assert!(!session.access_token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let owner = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = self
            .repo
            .get_password_hash(owner.id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.issuer.issue_access(owner.id)?;
        let refresh_token = self.issuer.issue_refresh(owner.id)?;
        info!(owner_id = owner.id, "owner_logged_in");
        Ok(AuthSession { owner, access_token, refresh_token })
    }

    /// Exchange a refresh token for a new access token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        self.issuer.refresh(refresh_token, &*self.repo).await
    }

    /// Resolve a bearer token to the owner behind it.
    pub async fn resolve_bearer(&self, token: Option<&str>) -> Result<Principal, AuthError> {
        self.guard.resolve(token, &*self.repo).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockPrincipalRepository;

    fn svc() -> AuthService<MockPrincipalRepository> {
        AuthService::new(
            Arc::new(MockPrincipalRepository::default()),
            AuthConfig {
                secret: "auth-service-test".into(),
                algorithm: Algorithm::HS256,
                access_ttl: Duration::from_secs(900),
                refresh_ttl: Duration::from_secs(604_800),
            },
        )
    }

    fn register_input(email: &str) -> RegisterInput {
        RegisterInput {
            name: "Owner".into(),
            email: email.into(),
            phone: Some("+79990001122".into()),
            password: "Passw0rd!".into(),
        }
    }

    #[tokio::test]
    async fn register_rejects_short_password() {
        let svc = svc();
        let mut input = register_input("short@example.com");
        input.password = "short".into();
        let err = svc.register(input).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
    }

    #[tokio::test]
    async fn register_twice_is_a_conflict() {
        let svc = svc();
        svc.register(register_input("dup@example.com")).await.unwrap();
        let err = svc.register(register_input("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::Conflict));
    }

    #[tokio::test]
    async fn login_issues_decodable_token_pair() {
        let svc = svc();
        let owner = svc.register(register_input("pair@example.com")).await.unwrap();
        let session = svc
            .login(LoginInput { email: "pair@example.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap();
        assert_eq!(session.owner.id, owner.id);

        let resolved = svc.resolve_bearer(Some(&session.access_token)).await.unwrap();
        assert_eq!(resolved.id, owner.id);

        let new_access = svc.refresh(&session.refresh_token).await.unwrap();
        let resolved = svc.resolve_bearer(Some(&new_access)).await.unwrap();
        assert_eq!(resolved.id, owner.id);
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let svc = svc();
        svc.register(register_input("secure@example.com")).await.unwrap();

        let unknown = svc
            .login(LoginInput { email: "nobody@example.com".into(), password: "Passw0rd!".into() })
            .await
            .unwrap_err();
        let wrong = svc
            .login(LoginInput { email: "secure@example.com".into(), password: "Wrong0rd!".into() })
            .await
            .unwrap_err();
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
    }
}

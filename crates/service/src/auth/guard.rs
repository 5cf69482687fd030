//! Resolves a bearer credential to the owner behind it.

use tracing::instrument;

use super::codec;
use super::domain::Principal;
use super::errors::AuthError;
use super::repository::PrincipalRepository;
use super::service::AuthConfig;

/// Every rejection collapses to `Unauthenticated`: callers cannot tell a
/// missing token from an expired one, a bad signature, or a deleted owner.
#[derive(Clone)]
pub struct AccessGuard {
    cfg: AuthConfig,
}

impl AccessGuard {
    pub fn new(cfg: AuthConfig) -> Self {
        Self { cfg }
    }

    #[instrument(skip_all)]
    pub async fn resolve<R: PrincipalRepository + ?Sized>(
        &self,
        token: Option<&str>,
        repo: &R,
    ) -> Result<Principal, AuthError> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        let claims = codec::decode_claims(token, &self.cfg.secret, self.cfg.algorithm)
            .map_err(|_| AuthError::Unauthenticated)?;
        let owner_id: i64 = claims.sub.parse().map_err(|_| AuthError::Unauthenticated)?;
        repo.find_by_id(owner_id)
            .await
            .map_err(|_| AuthError::Unauthenticated)?
            .ok_or(AuthError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::codec::Claims;
    use crate::auth::repository::mock::MockPrincipalRepository;
    use crate::auth::session::SessionIssuer;
    use chrono::Utc;
    use jsonwebtoken::Algorithm;
    use std::time::Duration;

    const SECRET: &str = "guard-test-secret";

    fn cfg() -> AuthConfig {
        AuthConfig {
            secret: SECRET.into(),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::from_secs(900),
            refresh_ttl: Duration::from_secs(604_800),
        }
    }

    #[tokio::test]
    async fn valid_token_resolves_owner() {
        let repo = MockPrincipalRepository::default();
        let owner = repo.create_owner("Bob", "bob@example.com", None, "h").await.unwrap();
        let token = SessionIssuer::new(cfg()).issue_access(owner.id).unwrap();

        let resolved = AccessGuard::new(cfg()).resolve(Some(&token), &repo).await.unwrap();
        assert_eq!(resolved, owner);
    }

    #[tokio::test]
    async fn all_failure_modes_collapse_to_unauthenticated() {
        let repo = MockPrincipalRepository::default();
        let owner = repo.create_owner("Eve", "eve@example.com", None, "h").await.unwrap();
        let guard = AccessGuard::new(cfg());

        // missing token
        let err = guard.resolve(None, &repo).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));

        // malformed token
        let err = guard.resolve(Some("garbage"), &repo).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));

        // wrong signing key
        let other = SessionIssuer::new(AuthConfig { secret: "other".into(), ..cfg() });
        let forged = other.issue_access(owner.id).unwrap();
        let err = guard.resolve(Some(&forged), &repo).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));

        // expired token
        let stale = codec::encode_claims(
            &Claims { sub: owner.id.to_string(), exp: (Utc::now().timestamp() - 60) as usize },
            SECRET,
            Algorithm::HS256,
        )
        .unwrap();
        let err = guard.resolve(Some(&stale), &repo).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));

        // subject that is not a number
        let odd = codec::encode_claims(
            &Claims { sub: "bob".into(), exp: (Utc::now().timestamp() + 60) as usize },
            SECRET,
            Algorithm::HS256,
        )
        .unwrap();
        let err = guard.resolve(Some(&odd), &repo).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));

        // owner deleted after issuing
        let token = SessionIssuer::new(cfg()).issue_access(owner.id).unwrap();
        repo.remove(owner.id);
        let err = guard.resolve(Some(&token), &repo).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthenticated));
    }
}

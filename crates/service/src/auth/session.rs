//! Mints access/refresh token pairs and exchanges refresh tokens.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, instrument};

use super::codec::{self, Claims};
use super::errors::AuthError;
use super::repository::PrincipalRepository;
use super::service::AuthConfig;

/// Stateless issuer: both token kinds carry only `{sub, exp}` and differ in
/// lifetime alone.
#[derive(Clone)]
pub struct SessionIssuer {
    cfg: AuthConfig,
}

impl SessionIssuer {
    pub fn new(cfg: AuthConfig) -> Self {
        Self { cfg }
    }

    pub fn access_ttl(&self) -> Duration {
        self.cfg.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.cfg.refresh_ttl
    }

    fn issue(&self, owner_id: i64, ttl: Duration) -> Result<String, AuthError> {
        let claims = Claims {
            sub: owner_id.to_string(),
            exp: Utc::now().timestamp() as usize + ttl.as_secs() as usize,
        };
        codec::encode_claims(&claims, &self.cfg.secret, self.cfg.algorithm)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    pub fn issue_access(&self, owner_id: i64) -> Result<String, AuthError> {
        self.issue(owner_id, self.cfg.access_ttl)
    }

    pub fn issue_refresh(&self, owner_id: i64) -> Result<String, AuthError> {
        self.issue(owner_id, self.cfg.refresh_ttl)
    }

    /// Exchange a refresh token for a fresh access token. The owner must
    /// still exist; every rejection surfaces as `Unauthenticated`.
    ///
    /// The refresh token itself stays valid until its own expiry.
    // TODO: rotate the refresh token on use instead of letting clients keep
    // the original for the full seven days.
    #[instrument(skip_all)]
    pub async fn refresh<R: PrincipalRepository + ?Sized>(
        &self,
        refresh_token: &str,
        repo: &R,
    ) -> Result<String, AuthError> {
        let claims = codec::decode_claims(refresh_token, &self.cfg.secret, self.cfg.algorithm)
            .map_err(|_| AuthError::Unauthenticated)?;
        let owner_id: i64 = claims.sub.parse().map_err(|_| AuthError::Unauthenticated)?;
        let owner = repo
            .find_by_id(owner_id)
            .await
            .map_err(|_| AuthError::Unauthenticated)?
            .ok_or(AuthError::Unauthenticated)?;
        debug!(owner_id = owner.id, "refresh_accepted");
        self.issue_access(owner.id)
    }
}

use thiserror::Error;

/// Errors produced while signing or checking a credential token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("credential expired")]
    Expired,
    #[error("credential signature invalid")]
    InvalidSignature,
    #[error("credential malformed")]
    Malformed,
    #[error("credential could not be signed: {0}")]
    Signing(String),
}

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("owner already exists")]
    Conflict,
    /// Login failed; deliberately silent about which check failed.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Bearer credential rejected; deliberately silent about why.
    #[error("not authenticated")]
    Unauthenticated,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::InvalidCredentials => 1003,
            AuthError::Unauthenticated => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

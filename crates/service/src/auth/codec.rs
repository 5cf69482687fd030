//! Signing and checking of credential tokens.
//!
//! Pure transform over `jsonwebtoken`; no clock or storage access beyond the
//! expiry check built into validation. Zero leeway: a token expired by one
//! second is reported as `Expired`, never as a signature problem.

use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::CredentialError;

/// Claims carried by every credential: the owner id and the expiry instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn encode_claims(
    claims: &Claims,
    secret: &str,
    algorithm: Algorithm,
) -> Result<String, CredentialError> {
    encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| CredentialError::Signing(e.to_string()))
}

pub fn decode_claims(
    token: &str,
    secret: &str,
    algorithm: Algorithm,
) -> Result<Claims, CredentialError> {
    let mut validation = Validation::new(algorithm);
    validation.leeway = 0;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => CredentialError::Expired,
            ErrorKind::InvalidSignature => CredentialError::InvalidSignature,
            _ => CredentialError::Malformed,
        })
}

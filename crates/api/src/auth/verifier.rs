//! The identity verifier seam.
//!
//! Handlers never inspect credentials themselves. The access guard hands the
//! raw bearer credential to whichever [`IdentityVerifier`] lives in
//! [`AppState`](crate::state::AppState) and only proceeds with the
//! [`Principal`] it returns.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;

use crate::auth::jwt::{validate_token, JwtConfig};

/// A verified caller identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub email: String,
    pub name: Option<String>,
}

/// Why a credential was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("credential has expired")]
    Expired,

    #[error("credential rejected: {0}")]
    Rejected(String),
}

/// Turns a bearer credential into a verified [`Principal`].
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<Principal, VerifyError>;
}

/// Verifies HS256 JWTs signed with the shared secret.
pub struct JwtVerifier {
    config: JwtConfig,
}

impl JwtVerifier {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IdentityVerifier for JwtVerifier {
    async fn verify(&self, credential: &str) -> Result<Principal, VerifyError> {
        let claims = validate_token(credential, &self.config).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => VerifyError::Expired,
            _ => VerifyError::Rejected(e.to_string()),
        })?;

        if claims.sub.trim().is_empty() {
            return Err(VerifyError::Rejected("token has no subject".into()));
        }

        Ok(Principal {
            email: claims.sub,
            name: claims.name,
        })
    }
}

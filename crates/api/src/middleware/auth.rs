//! Bearer-credential extractors for Axum handlers.
//!
//! Both extractors hand the raw credential to the [`IdentityVerifier`]
//! held in [`AppState`] and never look inside it themselves.
//!
//! [`IdentityVerifier`]: crate::auth::verifier::IdentityVerifier

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use prodboard_core::error::CoreError;
use prodboard_core::identity::normalize_email;

use crate::auth::verifier::VerifyError;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from the `Authorization: Bearer` header.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(email = %user.email, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The caller's normalized email, the identity every ownership check
    /// compares.
    pub email: String,
    /// Display name, when the identity provider supplied one.
    pub name: Option<String>,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        authenticate(auth_header, state).await
    }
}

/// Optional caller identity for open routes.
///
/// `None` when no `Authorization` header is sent. A header that is present
/// but malformed or rejected still fails with 401.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(MaybeAuthUser(None));
        };

        let auth_header = header.to_str().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(
                "Authorization header is not valid ASCII".into(),
            ))
        })?;

        authenticate(auth_header, state).await.map(|u| MaybeAuthUser(Some(u)))
    }
}

async fn authenticate(auth_header: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

    let principal = state.verifier.verify(token).await.map_err(|e| {
        tracing::debug!(error = %e, "Bearer credential rejected");
        let message = match e {
            VerifyError::Expired => "Token has expired",
            VerifyError::Rejected(_) => "Invalid or expired token",
        };
        AppError::Core(CoreError::Unauthorized(message.into()))
    })?;

    Ok(AuthUser {
        email: normalize_email(&principal.email),
        name: principal.name,
    })
}

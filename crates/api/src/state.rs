use std::sync::Arc;

use crate::auth::verifier::IdentityVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, created once at startup.
    pub pool: prodboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Verifies bearer credentials for the access guard.
    pub verifier: Arc<dyn IdentityVerifier>,
}

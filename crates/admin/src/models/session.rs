//! Session-scoped authentication models.
//!
//! The session stores only the backend-issued token. The admin identity
//! and role are *not* cached: the access gate re-resolves them from the
//! token on every request, so a revoked token or removed role takes
//! effect immediately.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use spotlyt_core::AdminRole;

/// Keys used for session storage.
pub mod session_keys {
    /// Backend tokens for the signed-in principal.
    pub const STORED_TOKENS: &str = "spotlyt_admin.tokens";
}

/// Backend tokens held in the session after a completed magic-link flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredTokens {
    /// Bearer token for GoTrue introspection.
    pub access_token: String,
}

/// The admin identity resolved for the current request.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    /// Backend principal id.
    pub id: Uuid,
    /// Email on the principal, when the backend reports one.
    pub email: Option<String>,
    /// Privileged role that admitted this principal.
    pub role: AdminRole,
    /// Access token the identity was resolved from.
    pub access_token: String,
}

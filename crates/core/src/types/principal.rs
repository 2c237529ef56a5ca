//! Authenticated identity issued by the backend auth service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated principal.
///
/// Carries the backend user id, the email the token was issued for, and the
/// application-level role claim embedded in the token's app metadata (if
/// the backend operator assigned one). The claim is checked first during
/// admin resolution; absence falls back to the `admin_profiles` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Backend identity id.
    pub id: Uuid,
    /// Email address on the identity, when present.
    pub email: Option<String>,
    /// Application-level role claim (`app_metadata.role`), verbatim.
    pub role_claim: Option<String>,
}

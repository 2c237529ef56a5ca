//! Wire types for the GoTrue and PostgREST APIs.

use serde::Deserialize;
use uuid::Uuid;

use spotlyt_core::Principal;

/// GoTrue user object returned by `GET /auth/v1/user`.
#[derive(Debug, Deserialize)]
pub struct GoTrueUser {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

/// The slice of GoTrue app metadata the dashboard cares about.
#[derive(Debug, Default, Deserialize)]
pub struct AppMetadata {
    pub role: Option<String>,
}

impl From<GoTrueUser> for Principal {
    fn from(user: GoTrueUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role_claim: user.app_metadata.role,
        }
    }
}

/// GoTrue error body. The service is inconsistent about the field name
/// across endpoints, so all known spellings are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct GoTrueError {
    pub error_description: Option<String>,
    pub msg: Option<String>,
    pub message: Option<String>,
}

impl GoTrueError {
    /// Best-effort human-readable message.
    pub fn into_message(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}

/// PostgREST error body.
#[derive(Debug, Default, Deserialize)]
pub struct PostgrestError {
    pub message: Option<String>,
}

/// `admin_profiles` projection for the role lookup (`select=role`).
#[derive(Debug, Deserialize)]
pub struct AdminProfileRole {
    pub role: Option<String>,
}

//! Admin role - the fixed privileged set that grants dashboard access.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A privileged role name.
///
/// Only these two values admit a principal to the dashboard. Parsing IS the
/// membership check: any other role string fails to parse and is treated as
/// non-admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full administrative access, including admin user management.
    SuperAdmin,
    /// Standard administrative access.
    Admin,
}

impl AdminRole {
    /// Parse a role string into the privileged set.
    ///
    /// Returns `None` for any role outside the set - the caller treats that
    /// as a denial, never as an error.
    #[must_use]
    pub fn parse(role: &str) -> Option<Self> {
        match role {
            "super_admin" => Some(Self::SuperAdmin),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// The wire/database representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_privileged_roles() {
        assert_eq!(AdminRole::parse("super_admin"), Some(AdminRole::SuperAdmin));
        assert_eq!(AdminRole::parse("admin"), Some(AdminRole::Admin));
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(AdminRole::parse("moderator"), None);
        assert_eq!(AdminRole::parse("ADMIN"), None);
        assert_eq!(AdminRole::parse(""), None);
    }

    #[test]
    fn serde_round_trip_is_snake_case() {
        let json = serde_json::to_string(&AdminRole::SuperAdmin).expect("serialize");
        assert_eq!(json, "\"super_admin\"");
    }
}

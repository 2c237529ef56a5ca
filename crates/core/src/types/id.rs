//! Newtype IDs for type-safe entity references.
//!
//! Backend rows are keyed by UUIDs. Wrapping them prevents a user id from
//! being passed where a news id is expected.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe UUID wrapper.
///
/// Creates a newtype around [`Uuid`] with transparent serde, `Display`,
/// and `From`/`Into` conversions.
macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wrap a raw UUID.
            #[must_use]
            pub const fn new(id: Uuid) -> Self {
                Self(id)
            }

            /// The underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_uuid_id! {
    /// Identifier of a `users` row (creators and everyone else).
    UserId
}

define_uuid_id! {
    /// Identifier of a `spotlyt_news` row.
    NewsId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let raw = Uuid::nil();
        let user = UserId::new(raw);
        let news = NewsId::new(raw);
        assert_eq!(user.as_uuid(), news.as_uuid());
        // `let _: UserId = news;` would not compile.
    }

    #[test]
    fn serde_is_transparent() {
        let id = NewsId::new(Uuid::nil());
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
        let back: NewsId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}

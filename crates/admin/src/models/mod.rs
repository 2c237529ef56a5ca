//! Domain models for the admin dashboard.

pub mod session;

pub use session::{CurrentAdmin, StoredTokens, session_keys};

//! HTTP middleware stack for the admin dashboard.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost - added in `main`)
//! 2. `TraceLayer` (request tracing - added in `main`)
//! 3. Session layer (in-memory store, SameSite=Strict)
//! 4. Access gate (the `RequireAdmin` extractor on protected routes)

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, clear_stored_tokens, set_stored_tokens};
pub use session::create_session_layer;

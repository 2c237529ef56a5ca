//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health             - Liveness check
//!
//! # Dashboard
//! GET  /                   - Dashboard overview (gated; first view loads)
//! POST /refresh            - Manual refresh (gated; no-op while refreshing)
//!
//! # Auth (passwordless email links - no passwords anywhere)
//! GET  /auth/login         - Sign-in form
//! POST /auth/login         - Request a magic link; result shown inline
//! GET  /auth/callback      - Relay page for the emailed link
//! POST /auth/session       - Establish the session from returned tokens
//! POST /auth/logout        - Sign out
//!
//! # News (gated)
//! POST /news               - Create an announcement
//! POST /news/{id}          - Update an announcement
//! POST /news/{id}/delete   - Delete an announcement
//! ```
//!
//! When backend credentials are missing the whole router is replaced by
//! [`unconfigured_router`], which renders remediation instructions on
//! every path and never talks to the backend.

use askama::Template;
use axum::{
    Router,
    response::Html,
    routing::{get, post},
};

pub mod auth;
pub mod dashboard;
pub mod news;

use crate::{config::MISSING_BACKEND_HELP, middleware::create_session_layer, state::AppState};

/// Build the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/", get(dashboard::dashboard))
        .route("/refresh", post(dashboard::refresh))
        .merge(auth::router())
        .merge(news::router())
}

/// The complete application: routes plus the session layer.
#[must_use]
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    routes().layer(session_layer).with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Configuration-error page template.
#[derive(Template)]
#[template(path = "config_error.html")]
struct ConfigErrorTemplate {
    message: &'static str,
}

/// Router served when backend credentials are missing.
///
/// Terminal state: every path renders the remediation page; no backend
/// client exists and no session check is ever attempted.
#[must_use]
pub fn unconfigured_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .fallback(config_error)
}

async fn config_error() -> Html<String> {
    let template = ConfigErrorTemplate {
        message: MISSING_BACKEND_HELP,
    };
    Html(
        template
            .render()
            .unwrap_or_else(|_| String::from("Configuration required")),
    )
}

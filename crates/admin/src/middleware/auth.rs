//! The access gate: authentication middleware and extractors.
//!
//! Gate states map onto HTTP flow:
//! - no session token -> redirect to the sign-in form
//! - token that no longer resolves, failed role lookup, or non-admin role
//!   -> redirect to the sign-in form carrying the denial message
//! - privileged role -> the wrapped handler runs
//!
//! Resolution runs in full on every request; there is no cached
//! "authorized" result to go stale.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    auth::resolve_admin,
    error::set_sentry_user,
    models::{CurrentAdmin, StoredTokens, session_keys},
    state::AppState,
};

/// Extractor that requires an authenticated admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.id)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

/// Error returned when admin access is required but not established.
pub enum AdminGateRejection {
    /// No usable session - plain redirect to the sign-in form.
    RedirectToLogin,
    /// Session exists but the principal was denied; the message is shown
    /// inline on the sign-in form.
    Denied(String),
}

impl IntoResponse for AdminGateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Denied(message) => {
                let location = format!("/auth/login?error={}", urlencoding::encode(&message));
                Redirect::to(&location).into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminGateRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminGateRejection::RedirectToLogin)?;

        let tokens: StoredTokens = session
            .get(session_keys::STORED_TOKENS)
            .await
            .ok()
            .flatten()
            .ok_or(AdminGateRejection::RedirectToLogin)?;

        // The token must still resolve upstream; a dead token clears the
        // session so the next attempt starts clean.
        let principal = match state.backend().get_principal(&tokens.access_token).await {
            Ok(principal) => principal,
            Err(e) => {
                tracing::warn!(error = %e, "stored token no longer resolves");
                let _ = session.remove::<StoredTokens>(session_keys::STORED_TOKENS).await;
                return Err(AdminGateRejection::Denied(e.to_string()));
            }
        };

        // A lookup failure is a denial with a message, never an admission.
        let role = resolve_admin(state.backend().as_ref(), &principal)
            .await
            .map_err(|e| AdminGateRejection::Denied(e.to_string()))?;

        let Some(role) = role else {
            return Err(AdminGateRejection::Denied(
                "This account is not a Spotlyt admin.".to_owned(),
            ));
        };

        set_sentry_user(principal.id, principal.email.as_deref());

        Ok(Self(CurrentAdmin {
            id: principal.id,
            email: principal.email,
            role,
            access_token: tokens.access_token,
        }))
    }
}

/// Store backend tokens in the session after a completed sign-in.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_stored_tokens(
    session: &Session,
    tokens: &StoredTokens,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::STORED_TOKENS, tokens).await
}

/// Clear backend tokens from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_stored_tokens(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<StoredTokens>(session_keys::STORED_TOKENS)
        .await?;
    Ok(())
}

//! Authentication route handlers.
//!
//! Passwordless only: the form takes an email, the backend mails a magic
//! link, and the link lands on the callback page which forwards the token
//! fragment to `POST /auth/session`. Admission is decided there and on
//! every request after.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use spotlyt_core::Email;

use crate::{
    auth::resolve_admin,
    error::{clear_sentry_user, set_sentry_user},
    middleware::{clear_stored_tokens, set_stored_tokens},
    models::{StoredTokens, session_keys},
    state::AppState,
};

/// Sign-in page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    error: Option<String>,
    notice: Option<String>,
}

/// Magic-link relay page template.
#[derive(Template)]
#[template(path = "auth/callback.html")]
struct CallbackTemplate;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(request_magic_link))
        .route("/auth/callback", get(callback_page))
        .route("/auth/session", post(establish_session))
        .route("/auth/logout", post(logout))
}

fn render_login(error: Option<String>, notice: Option<String>) -> Html<String> {
    Html(
        LoginTemplate { error, notice }
            .render()
            .unwrap_or_else(|_| String::from("Error rendering template")),
    )
}

fn login_redirect(error: &str) -> Redirect {
    let location = format!("/auth/login?error={}", urlencoding::encode(error));
    Redirect::to(&location)
}

/// Messages carried into the sign-in page (gate denials arrive this way).
#[derive(Debug, Deserialize)]
struct LoginQuery {
    error: Option<String>,
    notice: Option<String>,
}

/// Render the sign-in page.
///
/// GET /auth/login
async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    render_login(query.error, query.notice)
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    email: String,
}

/// Request a magic sign-in link. The result renders inline; no state
/// transition happens until the user completes the emailed link.
///
/// POST /auth/login
#[instrument(skip(state, form))]
async fn request_magic_link(
    State(state): State<AppState>,
    axum::Form(form): axum::Form<LoginForm>,
) -> impl IntoResponse {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(e) => return render_login(Some(e.to_string()), None),
    };

    match state
        .backend()
        .send_magic_link(&email, &state.config().callback_url())
        .await
    {
        Ok(()) => render_login(
            None,
            Some(
                "Check your email for the magic link. Once you confirm, you'll return here \
                 signed in."
                    .to_string(),
            ),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "magic link request failed");
            render_login(Some(e.to_string()), None)
        }
    }
}

/// Render the relay page that forwards the emailed link's URL fragment.
///
/// GET /auth/callback
async fn callback_page() -> impl IntoResponse {
    Html(
        CallbackTemplate
            .render()
            .unwrap_or_else(|_| String::from("Error rendering template")),
    )
}

#[derive(Debug, Deserialize)]
struct SessionForm {
    access_token: String,
}

/// Establish the session from the tokens the magic link returned.
///
/// Verifies the token upstream and runs the full role resolution before
/// anything is stored; a non-admin never gets a session worth having.
///
/// POST /auth/session
#[instrument(skip(state, session, form))]
async fn establish_session(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<SessionForm>,
) -> Redirect {
    let principal = match state.backend().get_principal(&form.access_token).await {
        Ok(principal) => principal,
        Err(e) => {
            tracing::warn!(error = %e, "sign-in token did not resolve");
            return login_redirect(&e.to_string());
        }
    };

    let role = match resolve_admin(state.backend().as_ref(), &principal).await {
        Ok(Some(role)) => role,
        Ok(None) => return login_redirect("This account is not a Spotlyt admin."),
        Err(e) => {
            tracing::warn!(error = %e, "admin role lookup failed during sign-in");
            return login_redirect(&e.to_string());
        }
    };

    let tokens = StoredTokens {
        access_token: form.access_token,
    };
    if let Err(e) = set_stored_tokens(&session, &tokens).await {
        tracing::error!(error = %e, "failed to store session tokens");
        return login_redirect("Could not establish a session. Try again.");
    }

    set_sentry_user(principal.id, principal.email.as_deref());
    tracing::info!(principal_id = %principal.id, %role, "admin signed in");
    Redirect::to("/")
}

/// Sign out: best-effort upstream revocation, then clear the session.
///
/// POST /auth/logout
#[instrument(skip(state, session))]
async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    if let Ok(Some(tokens)) = session
        .get::<StoredTokens>(session_keys::STORED_TOKENS)
        .await
    {
        if let Err(e) = state.backend().sign_out(&tokens.access_token).await {
            tracing::warn!(error = %e, "upstream sign-out failed");
        }
    }

    let _ = clear_stored_tokens(&session).await;
    clear_sentry_user();

    Redirect::to("/auth/login")
}

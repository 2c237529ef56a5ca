//! Access gate: admission and denial paths.

mod common;

use common::*;

#[tokio::test]
async fn anonymous_requests_redirect_to_login() {
    let backend = FakeBackend::new(base_data());
    let app = test_app(backend);

    let response = get(&app, "/", None).await;
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn principal_with_privileged_claim_is_admitted() {
    let backend = FakeBackend::new(base_data());
    let app = test_app(backend.clone());

    let cookie = sign_in(&app, TOKEN_CLAIM_ADMIN).await;
    let response = get(&app, "/", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
    let body = body_text(response).await;
    assert!(body.contains("Spotlyt Admin"));
    assert!(body.contains("claims@spotlyt.com"));

    // The claim short-circuits the table lookup entirely.
    assert_eq!(backend.calls("admin_profile_role"), 0);
}

#[tokio::test]
async fn principal_with_profile_row_is_admitted() {
    let backend = FakeBackend::new(base_data());
    let app = test_app(backend.clone());

    let cookie = sign_in(&app, TOKEN_PROFILE_ADMIN).await;
    let response = get(&app, "/", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
    assert!(backend.calls("admin_profile_role") > 0);
}

#[tokio::test]
async fn non_privileged_claim_still_falls_back_to_profile_row() {
    let backend = FakeBackend::new(base_data());
    let app = test_app(backend);

    let cookie = sign_in(&app, TOKEN_ODD_CLAIM).await;
    let response = get(&app, "/", Some(&cookie)).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn plain_user_is_denied_with_message() {
    let backend = FakeBackend::new(base_data());
    let app = test_app(backend);

    let response = post_form(
        &app,
        "/auth/session",
        &format!("access_token={TOKEN_PLAIN_USER}"),
        None,
    )
    .await;
    let location = location(&response);
    assert!(location.starts_with("/auth/login?error="), "got {location}");
    assert!(location.contains("not%20a%20Spotlyt%20admin"));
}

#[tokio::test]
async fn role_lookup_failure_is_a_denial_with_message() {
    let backend = FakeBackend::new(base_data());
    backend.fail_with("admin_profile_role", "profiles table offline");
    let app = test_app(backend);

    let response = post_form(
        &app,
        "/auth/session",
        &format!("access_token={TOKEN_PROFILE_ADMIN}"),
        None,
    )
    .await;
    let location = location(&response);
    assert!(location.starts_with("/auth/login?error="), "got {location}");
    assert!(location.contains("profiles%20table%20offline"));
}

#[tokio::test]
async fn authorized_result_is_not_cached_across_requests() {
    let backend = FakeBackend::new(base_data());
    let app = test_app(backend.clone());

    let cookie = sign_in(&app, TOKEN_PROFILE_ADMIN).await;
    let response = get(&app, "/", Some(&cookie)).await;
    assert_eq!(response.status(), 200);

    // Role evaluation starts failing; the previously authorized session
    // must not coast on a stale result.
    backend.fail_with("admin_profile_role", "profiles table offline");
    let response = get(&app, "/", Some(&cookie)).await;
    let location = location(&response);
    assert!(location.starts_with("/auth/login?error="), "got {location}");
}

#[tokio::test]
async fn revoked_token_sends_the_session_back_to_login() {
    let backend = FakeBackend::new(base_data());
    let app = test_app(backend.clone());

    let cookie = sign_in(&app, TOKEN_CLAIM_ADMIN).await;

    // Upstream revokes the token.
    backend
        .data
        .lock()
        .expect("data lock")
        .principals
        .remove(TOKEN_CLAIM_ADMIN);

    let response = get(&app, "/", Some(&cookie)).await;
    let location = location(&response);
    assert!(location.starts_with("/auth/login?error="), "got {location}");
}

#[tokio::test]
async fn magic_link_request_reports_inline() {
    let backend = FakeBackend::new(base_data());
    let app = test_app(backend.clone());

    let response = post_form(&app, "/auth/login", "email=admin%40spotlyt.com", None).await;
    assert_eq!(response.status(), 200);
    let body = body_text(response).await;
    assert!(body.contains("Check your email for the magic link"));
    assert_eq!(backend.calls("send_magic_link"), 1);

    // A malformed address never reaches the backend.
    let response = post_form(&app, "/auth/login", "email=not-an-email", None).await;
    let body = body_text(response).await;
    assert!(body.contains("name@domain"));
    assert_eq!(backend.calls("send_magic_link"), 1);
}

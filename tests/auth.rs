mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn login_page_shows_both_forms() {
    let app = TestApp::new().await;

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains(r#"name="signup""#));
    assert!(html.contains(r#"name="login""#));
    assert!(!html.contains("{{ flash }}"));
}

#[tokio::test]
async fn signup_creates_account_and_redirects_with_notice() {
    let app = TestApp::new().await;

    let response = app.signup("Anna", "anna@example.com", "hunter2").await;
    assert_redirect(&response, "/");
    assert_eq!(cookie_set(&response, "flash").as_deref(), Some("flash=signup_ok"));
    assert!(session_cookie(&response).is_none());
    assert_eq!(app.account_count().await, 1);

    // The notice is shown once on the next page and then cleared.
    let page = app.get("/", Some("flash=signup_ok")).await;
    assert!(cookie_cleared(&page, "flash"));
    assert!(text_body(page).await.contains("Signup successful! Please log in."));
}

#[tokio::test]
async fn duplicate_email_does_not_create_a_second_account() {
    let app = TestApp::new().await;
    app.signup("Anna", "anna@example.com", "hunter2").await;
    let before = app.account_count().await;

    let response = app.signup("Other", "anna@example.com", "secret").await;
    assert_redirect(&response, "/");
    assert_eq!(
        cookie_set(&response, "flash").as_deref(),
        Some("flash=signup_duplicate")
    );
    assert_eq!(app.account_count().await, before);

    // Case differences do not sneak past the unique index.
    app.signup("Other", "ANNA@example.com", "secret").await;
    assert_eq!(app.account_count().await, before);
}

#[tokio::test]
async fn signup_with_missing_field_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_form("signup=signup&fullname=Anna&email=anna@example.com")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "bad_request");
    assert_eq!(app.account_count().await, 0);
}

#[tokio::test]
async fn form_without_action_is_rejected() {
    let app = TestApp::new().await;
    let response = app.post_form("email=anna@example.com&password=x").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_never_establishes_a_session() {
    let app = TestApp::new().await;
    app.signup("Anna", "anna@example.com", "hunter2").await;

    let response = app.login("anna@example.com", "wrong").await;
    assert_redirect(&response, "/");
    assert!(session_cookie(&response).is_none());
    assert_eq!(
        cookie_set(&response, "flash").as_deref(),
        Some("flash=invalid_credentials")
    );
}

#[tokio::test]
async fn unknown_email_gets_the_same_notice_as_a_bad_password() {
    let app = TestApp::new().await;

    let response = app.login("ghost@example.com", "hunter2").await;
    assert_redirect(&response, "/");
    assert!(session_cookie(&response).is_none());
    assert_eq!(
        cookie_set(&response, "flash").as_deref(),
        Some("flash=invalid_credentials")
    );
}

#[tokio::test]
async fn login_opens_the_trainer() {
    let app = TestApp::new().await;
    app.signup("Anna", "anna@example.com", "hunter2").await;

    let response = app.login("anna@example.com", "hunter2").await;
    assert_redirect(&response, "/load_flashcards");
    let session = session_cookie(&response).unwrap();

    let page = app.get("/load_flashcards", Some(&session)).await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = text_body(page).await;
    assert!(html.contains("Hallo, Anna"));
    assert!(html.contains("/static/flashcards.js"));
}

#[tokio::test]
async fn trainer_requires_a_session() {
    let app = TestApp::new().await;

    let response = app.get("/load_flashcards", None).await;
    assert_redirect(&response, "/");
    assert_eq!(
        cookie_set(&response, "flash").as_deref(),
        Some("flash=login_required")
    );

    let forged = app.get("/load_flashcards", Some("session=not.a.token")).await;
    assert_redirect(&forged, "/");
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = TestApp::new().await;

    let response = app.get("/logout", None).await;
    assert_redirect(&response, "/");
    assert!(cookie_cleared(&response, "session"));
    assert_eq!(cookie_set(&response, "flash").as_deref(), Some("flash=logged_out"));
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");
}

#[tokio::test]
async fn form_sent_as_json_gets_the_json_error_body() {
    let app = TestApp::new().await;

    let response = app
        .post_raw("/", "application/json", r#"{"login":"login"}"#, None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "bad_request");
}

#[tokio::test]
async fn signup_reports_failure_when_the_store_is_down() {
    let app = TestApp::new().await;
    app.pool.close().await;

    let response = app.signup("Anna", "anna@example.com", "hunter2").await;
    assert_redirect(&response, "/");
    assert_eq!(
        cookie_set(&response, "flash").as_deref(),
        Some("flash=signup_failed")
    );
    assert!(session_cookie(&response).is_none());
}

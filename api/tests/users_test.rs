//! HTTP tests for the /api/users endpoints, run against in-memory stores

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use pr_api::create_app;

fn verification_body(email: &str, password: &str, code: u32) -> Value {
    json!({
        "user": { "email": email, "password": password },
        "emailVerification": { "email": email, "code": code }
    })
}

/// A code guaranteed to differ from `code`
fn other_code(code: u32) -> u32 {
    if code == 999_999 {
        100_000
    } else {
        code + 1
    }
}

macro_rules! post {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! register_user {
    ($app:expr, $ctx:expr, $email:expr, $password:expr) => {{
        let resp = post!($app, "/api/users/register", json!({ "email": $email }));
        assert_eq!(resp.status(), StatusCode::OK);
        let code = $ctx.mailer.last_code_for($email).await.unwrap();
        let resp = post!(
            $app,
            "/api/users/emailVerification",
            verification_body($email, $password, code)
        );
        assert_eq!(resp.status(), StatusCode::OK);
    }};
}

#[actix_web::test]
async fn test_register_sends_code() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = post!(app, "/api/users/register", json!({ "email": "a@b.com" }));

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Verification code sent.");
    let code = ctx.mailer.last_code_for("a@b.com").await.unwrap();
    assert!((100_000..=999_999).contains(&code));
}

#[actix_web::test]
async fn test_second_register_within_ttl() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    post!(app, "/api/users/register", json!({ "email": "a@b.com" }));

    let resp = post!(app, "/api/users/register", json!({ "email": "a@b.com" }));

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CODE_ALREADY_ACTIVE");
    assert_eq!(ctx.mailer.get_message_count(), 1);
}

#[actix_web::test]
async fn test_register_rejects_malformed_email() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = post!(app, "/api/users/register", json!({ "email": "not-an-email" }));

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_EMAIL");
}

#[actix_web::test]
async fn test_register_rejects_empty_email() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = post!(app, "/api/users/register", json!({ "email": "" }));

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_undecodable_body() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = post!(app, "/api/users/register", json!({ "mail": "a@b.com" }));

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BAD_REQUEST");
}

#[actix_web::test]
async fn test_delivery_failure() {
    let ctx = common::context();
    ctx.mailer.set_simulate_failure(true);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = post!(app, "/api/users/register", json!({ "email": "a@b.com" }));

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DELIVERY_FAILED");
}

#[actix_web::test]
async fn test_full_flow() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    post!(app, "/api/users/register", json!({ "email": "a@b.com" }));
    let code = ctx.mailer.last_code_for("a@b.com").await.unwrap();

    let resp = post!(
        app,
        "/api/users/emailVerification",
        json!({
            "user": { "email": "a@b.com", "password": "pw", "role": "Admin" },
            "emailVerification": { "email": "a@b.com", "code": code }
        })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "a@b.com");
    assert_eq!(ctx.users.len().await, 1);

    let resp = post!(
        app,
        "/api/users/login",
        json!({ "email": "a@b.com", "password": "pw" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let login: Value = test::read_body_json(resp).await;
    assert_eq!(login["expiresIn"], 3600);
    let access_token = login["accessToken"].as_str().unwrap().to_string();
    let refresh_token = login["refreshToken"].as_str().unwrap().to_string();

    let claims = ctx
        .state
        .auth_service
        .verify_access_token(&access_token)
        .unwrap();
    assert_eq!(claims.role, "User");
    let user_id = claims.user_id().unwrap();

    let resp = post!(
        app,
        "/api/users/refresh-token",
        json!({ "userId": user_id, "refreshToken": refresh_token })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let refreshed: Value = test::read_body_json(resp).await;
    let renewed = ctx
        .state
        .auth_service
        .verify_access_token(refreshed["accessToken"].as_str().unwrap())
        .unwrap();
    assert_eq!(renewed.sub, claims.sub);
    assert_eq!(renewed.email, claims.email);

    // refresh tokens are not rotated
    let resp = post!(
        app,
        "/api/users/refresh-token",
        json!({ "userId": user_id, "refreshToken": refresh_token })
    );
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.tokens.len().await, 1);
}

#[actix_web::test]
async fn test_verification_without_code() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = post!(
        app,
        "/api/users/emailVerification",
        verification_body("a@b.com", "pw", 123456)
    );

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NO_CODE_FOUND");
}

#[actix_web::test]
async fn test_verification_with_wrong_code() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    post!(app, "/api/users/register", json!({ "email": "a@b.com" }));
    let code = ctx.mailer.last_code_for("a@b.com").await.unwrap();

    let resp = post!(
        app,
        "/api/users/emailVerification",
        verification_body("a@b.com", "pw", other_code(code))
    );

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CODE_MISMATCH");
    assert!(ctx.users.is_empty().await);
}

#[actix_web::test]
async fn test_verification_with_expired_code() {
    // codes expire the moment they are issued
    let ctx = common::context_with_ttl(0);
    let app = test::init_service(create_app(ctx.state.clone())).await;
    post!(app, "/api/users/register", json!({ "email": "a@b.com" }));
    let code = ctx.mailer.last_code_for("a@b.com").await.unwrap();

    let resp = post!(
        app,
        "/api/users/emailVerification",
        verification_body("a@b.com", "pw", code)
    );

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CODE_EXPIRED");
}

#[actix_web::test]
async fn test_verification_with_mismatched_emails() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    post!(app, "/api/users/register", json!({ "email": "a@b.com" }));
    let code = ctx.mailer.last_code_for("a@b.com").await.unwrap();

    let resp = post!(
        app,
        "/api/users/emailVerification",
        json!({
            "user": { "email": "a@b.com", "password": "pw" },
            "emailVerification": { "email": "x@y.com", "code": code }
        })
    );

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Invalid request data");
}

#[actix_web::test]
async fn test_register_after_registration() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    register_user!(app, ctx, "a@b.com", "pw");

    let resp = post!(app, "/api/users/register", json!({ "email": "a@b.com" }));

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "ALREADY_REGISTERED");
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    register_user!(app, ctx, "a@b.com", "right");

    let wrong_password = post!(
        app,
        "/api/users/login",
        json!({ "email": "a@b.com", "password": "wrong" })
    );
    let unknown_email = post!(
        app,
        "/api/users/login",
        json!({ "email": "nobody@b.com", "password": "right" })
    );

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let a: Value = test::read_body_json(wrong_password).await;
    let b: Value = test::read_body_json(unknown_email).await;
    assert_eq!(a["error"], "INVALID_CREDENTIALS");
    assert_eq!(a["error"], b["error"]);
    assert_eq!(a["message"], b["message"]);
    assert!(ctx.tokens.is_empty().await);
}

#[actix_web::test]
async fn test_refresh_with_another_users_id() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;
    register_user!(app, ctx, "a@b.com", "pw");
    register_user!(app, ctx, "c@d.com", "pw");

    let resp = post!(
        app,
        "/api/users/login",
        json!({ "email": "a@b.com", "password": "pw" })
    );
    let login: Value = test::read_body_json(resp).await;
    let refresh_token = login["refreshToken"].as_str().unwrap().to_string();
    let other_id = ctx
        .state
        .auth_service
        .verify_access_token(login["accessToken"].as_str().unwrap())
        .unwrap()
        .user_id()
        .unwrap()
        + 1;

    let foreign = post!(
        app,
        "/api/users/refresh-token",
        json!({ "userId": other_id, "refreshToken": refresh_token })
    );
    let bogus = post!(
        app,
        "/api/users/refresh-token",
        json!({ "userId": other_id, "refreshToken": "bogus" })
    );

    assert_eq!(foreign.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(bogus.status(), StatusCode::UNAUTHORIZED);
    let a: Value = test::read_body_json(foreign).await;
    let b: Value = test::read_body_json(bogus).await;
    assert_eq!(a["error"], "INVALID_TOKEN");
    assert_eq!(a["error"], b["error"]);
    assert_eq!(a["message"], b["message"]);
}

#[actix_web::test]
async fn test_refresh_rejects_bad_input() {
    let ctx = common::context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let resp = post!(
        app,
        "/api/users/refresh-token",
        json!({ "userId": 0, "refreshToken": "token" })
    );

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

//! Unit tests for the verification service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::user::{Role, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{
    MockUserRepository, MockVerificationCodeRepository, UserRepository,
};
use crate::services::verification::{VerificationService, VerificationServiceConfig};

use super::mocks::MockEmailService;

type TestService =
    VerificationService<MockUserRepository, MockVerificationCodeRepository, MockEmailService>;

struct Fixture {
    users: Arc<MockUserRepository>,
    codes: Arc<MockVerificationCodeRepository>,
    mailer: Arc<MockEmailService>,
    service: TestService,
}

fn fixture_with(mailer: MockEmailService) -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let mailer = Arc::new(mailer);
    let service = VerificationService::new(
        users.clone(),
        codes.clone(),
        mailer.clone(),
        VerificationServiceConfig::default(),
    );
    Fixture {
        users,
        codes,
        mailer,
        service,
    }
}

fn fixture() -> Fixture {
    fixture_with(MockEmailService::new())
}

async fn register(users: &MockUserRepository, email: &str) {
    users
        .create(User::new(email.to_string(), "hash".to_string(), Role::User))
        .await
        .unwrap();
}

fn auth_err(result: Result<impl std::fmt::Debug, DomainError>) -> AuthError {
    match result {
        Err(DomainError::Auth(e)) => e,
        other => panic!("expected auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_code_stores_and_sends() {
    let f = fixture();

    let result = f.service.request_code("a@b.com").await.unwrap();

    let stored = f.codes.all().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(result.email, "a@b.com");
    assert_eq!(result.expires_at, stored[0].expires_at);

    let sent = f.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@b.com");
    assert_eq!(sent[0].subject, "Code Verification");
    assert_eq!(sent[0].code, stored[0].code);
}

#[tokio::test]
async fn test_second_request_within_ttl_is_refused() {
    let f = fixture();
    f.service.request_code("a@b.com").await.unwrap();

    let err = auth_err(f.service.request_code("a@b.com").await);

    assert_eq!(err, AuthError::CodeAlreadyActive);
    assert_eq!(f.codes.all().await.len(), 1);
    assert_eq!(f.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_request_after_expiry_issues_new_code() {
    let f = fixture();
    f.service.request_code("a@b.com").await.unwrap();
    f.codes.set_expiry("a@b.com", Utc::now() - Duration::seconds(1)).await;

    f.service.request_code("a@b.com").await.unwrap();

    let stored = f.codes.all().await;
    assert_eq!(stored.len(), 2);
    assert!(stored[1].id > stored[0].id);
}

#[tokio::test]
async fn test_request_for_registered_email_is_refused() {
    let f = fixture();
    register(&f.users, "a@b.com").await;

    let err = auth_err(f.service.request_code("a@b.com").await);

    assert_eq!(err, AuthError::AlreadyRegistered);
    assert!(f.codes.all().await.is_empty());
}

#[tokio::test]
async fn test_delivery_failure_keeps_stored_code() {
    let f = fixture_with(MockEmailService::failing());

    let err = auth_err(f.service.request_code("a@b.com").await);
    assert_eq!(err, AuthError::DeliveryFailed);
    assert_eq!(f.codes.all().await.len(), 1);

    // the undelivered code still blocks a retry until it expires
    f.mailer.set_failure(false);
    let err = auth_err(f.service.request_code("a@b.com").await);
    assert_eq!(err, AuthError::CodeAlreadyActive);
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let f = fixture();
    f.codes.set_unavailable(true);

    let result = f.service.request_code("a@b.com").await;

    assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
    assert!(f.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_verify_correct_code() {
    let f = fixture();
    f.service.request_code("a@b.com").await.unwrap();
    let code = f.mailer.last_code_for("a@b.com").unwrap();

    assert!(f.service.verify_code("a@b.com", code).await.is_ok());
    // not consumed
    assert!(f.service.verify_code("a@b.com", code).await.is_ok());
    assert_eq!(f.users.count().await, 0);
}

#[tokio::test]
async fn test_verify_without_code() {
    let f = fixture();

    let err = auth_err(f.service.verify_code("a@b.com", 123456).await);

    assert_eq!(err, AuthError::NoCodeFound);
}

#[tokio::test]
async fn test_verify_wrong_code() {
    let f = fixture();
    f.service.request_code("a@b.com").await.unwrap();
    let code = f.mailer.last_code_for("a@b.com").unwrap();
    let wrong = if code == 999_999 { 100_000 } else { code + 1 };

    let err = auth_err(f.service.verify_code("a@b.com", wrong).await);

    assert_eq!(err, AuthError::CodeMismatch);
}

#[tokio::test]
async fn test_verify_expired_code() {
    let f = fixture();
    f.service.request_code("a@b.com").await.unwrap();
    let code = f.mailer.last_code_for("a@b.com").unwrap();
    f.codes.set_expiry("a@b.com", Utc::now() - Duration::minutes(1)).await;

    let err = auth_err(f.service.verify_code("a@b.com", code).await);

    assert_eq!(err, AuthError::CodeExpired);
}

#[tokio::test]
async fn test_mismatch_reported_before_expiry() {
    let f = fixture();
    f.service.request_code("a@b.com").await.unwrap();
    let code = f.mailer.last_code_for("a@b.com").unwrap();
    f.codes.set_expiry("a@b.com", Utc::now() - Duration::minutes(1)).await;
    let wrong = if code == 999_999 { 100_000 } else { code + 1 };

    let err = auth_err(f.service.verify_code("a@b.com", wrong).await);

    assert_eq!(err, AuthError::CodeMismatch);
}

#[tokio::test]
async fn test_only_latest_code_is_accepted() {
    let f = fixture();
    f.service.request_code("a@b.com").await.unwrap();
    let first = f.mailer.last_code_for("a@b.com").unwrap();
    f.codes.set_expiry("a@b.com", Utc::now() - Duration::seconds(1)).await;
    f.service.request_code("a@b.com").await.unwrap();
    let second = f.mailer.last_code_for("a@b.com").unwrap();

    if first != second {
        let err = auth_err(f.service.verify_code("a@b.com", first).await);
        assert_eq!(err, AuthError::CodeMismatch);
    }
    assert!(f.service.verify_code("a@b.com", second).await.is_ok());
}

#[tokio::test]
async fn test_verify_for_registered_email_is_refused_first() {
    let f = fixture();
    f.service.request_code("a@b.com").await.unwrap();
    let code = f.mailer.last_code_for("a@b.com").unwrap();
    register(&f.users, "a@b.com").await;

    let err = auth_err(f.service.verify_code("a@b.com", code).await);

    assert_eq!(err, AuthError::AlreadyRegistered);
}

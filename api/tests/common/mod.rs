//! Shared setup for the HTTP tests: in-memory stores and the mock mailer

#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;

use pr_api::AppState;
use pr_core::domain::entities::user::{Role, User};
use pr_core::repositories::UserRepository;
use pr_core::services::auth::{AuthService, AuthServiceConfig};
use pr_core::services::credentials::PasswordHasher;
use pr_core::services::token::TokenServiceConfig;
use pr_core::services::verification::VerificationServiceConfig;
use pr_infra::email::MockEmailService;
use pr_infra::memory::{
    InMemoryRefreshTokenRepository, InMemoryUserRepository, InMemoryVerificationCodeRepository,
};

pub type TestState = AppState<
    InMemoryUserRepository,
    InMemoryVerificationCodeRepository,
    InMemoryRefreshTokenRepository,
    MockEmailService,
>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub mailer: MockEmailService,
    pub users: Arc<InMemoryUserRepository>,
    pub tokens: Arc<InMemoryRefreshTokenRepository>,
}

pub fn test_config(code_ttl_minutes: i64) -> AuthServiceConfig {
    AuthServiceConfig {
        verification: VerificationServiceConfig {
            code_expiration_minutes: code_ttl_minutes,
            ..VerificationServiceConfig::default()
        },
        token: TokenServiceConfig {
            jwt_secret: "test-secret-key-for-http-tests".to_string(),
            ..TokenServiceConfig::default()
        },
        bcrypt_cost: 4,
    }
}

pub fn context_with_ttl(code_ttl_minutes: i64) -> TestContext {
    let mailer = MockEmailService::new();
    let users = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(InMemoryRefreshTokenRepository::new());

    let service = AuthService::build(
        users.clone(),
        Arc::new(InMemoryVerificationCodeRepository::new()),
        tokens.clone(),
        Arc::new(mailer.clone()),
        test_config(code_ttl_minutes),
    );

    TestContext {
        state: web::Data::new(AppState::new(Arc::new(service))),
        mailer,
        users,
        tokens,
    }
}

pub fn context() -> TestContext {
    context_with_ttl(10)
}

/// Stores a user directly, bypassing registration so any role can be seeded
pub async fn seed_user(ctx: &TestContext, email: &str, password: &str, role: Role) -> User {
    let hash = PasswordHasher::new(4).hash(password).await.unwrap();
    ctx.users
        .create(User::new(email.to_string(), hash, role))
        .await
        .unwrap()
}

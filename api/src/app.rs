//! Application factory
//!
//! Builds the actix-web `App` around an already constructed `AppState`, so
//! `main` and the HTTP tests share the same routing.

use actix_web::{middleware::Logger, web, App, HttpResponse};
use std::sync::Arc;

use pr_core::repositories::{RefreshTokenRepository, UserRepository, VerificationCodeRepository};
use pr_core::services::verification::EmailServiceTrait;

use crate::handlers::json_error_handler;
use crate::middleware::AccessTokenVerifier;
use crate::routes::admin::admin_only;
use crate::routes::users::{email_verification, login, refresh_token, register, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<U, V, R, E>(
    app_state: web::Data<AppState<U, V, R, E>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    R: RefreshTokenRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let verifier: Arc<dyn AccessTokenVerifier> = app_state.auth_service.clone();

    App::new()
        .app_data(app_state)
        .app_data(web::Data::new(verifier))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/users")
                .route("/register", web::post().to(register::<U, V, R, E>))
                .route(
                    "/emailVerification",
                    web::post().to(email_verification::<U, V, R, E>),
                )
                .route("/login", web::post().to(login::<U, V, R, E>))
                .route("/refresh-token", web::post().to(refresh_token::<U, V, R, E>)),
        )
        .service(web::scope("/api/admin").route("/admin-only", web::get().to(admin_only)))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "product-review-identity",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}

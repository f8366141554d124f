//! Endpoints restricted to `Admin` accounts
//!
//! - `GET /api/admin/admin-only` confirms the caller holds the Admin role

use actix_web::HttpResponse;

use pr_core::domain::entities::user::Role;

use crate::dto::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Admin-only endpoint handler
pub async fn admin_only(auth: AuthContext) -> Result<HttpResponse, ApiError> {
    auth.require_role(Role::Admin)?;

    tracing::info!(user_id = auth.user_id, event = "admin_access", "Admin endpoint served");
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "This data is available only for admins.".to_string(),
    }))
}

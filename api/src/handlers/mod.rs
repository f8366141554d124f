//! Request handling helpers shared by the routes

pub mod error;

pub use error::{json_error_handler, status_for, validate_request, ApiError};

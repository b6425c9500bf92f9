/**
 * Routes Module
 * API and page route handlers
 */

pub mod auth;
pub mod blocks;
pub mod health;
pub mod pages;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;

use crate::db;
use crate::error::ApiError;

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Success response (for delete)
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// The shared pool, or 503 when the service runs without a database.
pub fn require_pool() -> Result<Arc<PgPool>, ApiError> {
    db::get_pool().ok_or(ApiError::ServiceUnavailable)
}

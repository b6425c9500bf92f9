/**
 * Admin Authorization
 * Bearer JWT verification guarding the block editing endpoints
 */
use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_JWT_SECRET: &str = "default-jwt-secret-change-in-production";

/// Role carried by tokens that may edit blocks.
pub const ADMIN_ROLE: &str = "admin";

lazy_static::lazy_static! {
    /// JWT secret key from environment
    pub static ref JWT_SECRET: String = std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
}

// ============================================================================
// Types
// ============================================================================

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,  // Operator id
    pub role: String, // Operator role
    pub exp: i64,     // Expiry timestamp
    pub iat: i64,     // Issued at timestamp
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token lifetime is out of range")]
    InvalidTtl,

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Sign an access token valid for `ttl`.
pub fn create_access_token(
    subject: &str,
    role: &str,
    ttl: Duration,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let expires = now.checked_add_signed(ttl).ok_or(TokenError::InvalidTtl)?;
    let claims = Claims {
        sub: subject.to_string(),
        role: role.to_string(),
        exp: expires.timestamp(),
        iat: now.timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )?)
}

/// Verify and decode access token
pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Guard for admin handlers: a valid token carrying the admin role.
pub fn require_admin(headers: &HeaderMap) -> Result<Claims, ApiError> {
    let token = extract_bearer_token(headers).ok_or(ApiError::Unauthorized("Authorization required"))?;

    let claims = verify_access_token(token).map_err(|e| {
        tracing::debug!(error = %e, "rejected admin token");
        ApiError::Unauthorized("Invalid or expired token")
    })?;

    if claims.role != ADMIN_ROLE {
        tracing::warn!(sub = %claims.sub, role = %claims.role, "token without admin role");
        return Err(ApiError::Forbidden("Admin role required"));
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_verify_access_token_invalid_returns_err() {
        let result = verify_access_token("invalid.jwt.token");
        assert!(result.is_err());
    }

    #[test]
    fn test_token_round_trip() {
        let token = create_access_token("operator-1", "admin", Duration::minutes(5)).unwrap();
        let claims = verify_access_token(&token).unwrap();
        assert_eq!(claims.sub, "operator-1");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token = create_access_token("operator-1", "admin", Duration::minutes(-10)).unwrap();
        assert!(verify_access_token(&token).is_err());
    }

    #[test]
    fn test_require_admin_missing_header() {
        let err = require_admin(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized("Authorization required")));
    }

    #[test]
    fn test_require_admin_wrong_scheme() {
        let err = require_admin(&headers_with("Basic YWRtaW46YWRtaW4=")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized("Authorization required")));
    }

    #[test]
    fn test_require_admin_bad_token() {
        let err = require_admin(&headers_with("Bearer nope")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized("Invalid or expired token")));
    }

    #[test]
    fn test_require_admin_rejects_other_roles() {
        let token = create_access_token("editor-1", "viewer", Duration::minutes(5)).unwrap();
        let err = require_admin(&headers_with(&format!("Bearer {token}"))).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden("Admin role required")));
    }

    #[test]
    fn test_out_of_range_ttl_is_an_error() {
        let result = create_access_token("operator-1", ADMIN_ROLE, Duration::MAX);
        assert!(matches!(result, Err(TokenError::InvalidTtl)));
    }

    #[test]
    fn test_require_admin_accepts_valid_token() {
        let token = create_access_token("operator-1", "admin", Duration::minutes(5)).unwrap();
        let claims = require_admin(&headers_with(&format!("Bearer {token}"))).unwrap();
        assert_eq!(claims.sub, "operator-1");
    }
}

use actix_web::error::{ErrorForbidden, ErrorUnauthorized};
use actix_web::{Error, HttpRequest};

use super::jwt::validate_token;
use super::model::Claims;

/// Extract token from Authorization header
fn extract_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| {
            if auth.starts_with("Bearer ") {
                Some(auth[7..].to_string())
            } else {
                None
            }
        })
}

/// Validate token from HttpRequest and return claims
pub fn validate_request_token(req: &HttpRequest) -> Result<Claims, Error> {
    let token =
        extract_token(req).ok_or_else(|| ErrorUnauthorized("Missing authorization token"))?;

    let claims = validate_token(&token).map_err(|e| {
        log::warn!("Token validation failed: {:?}", e);
        ErrorUnauthorized("Invalid or expired token")
    })?;

    if claims.token_type != "access" {
        return Err(ErrorUnauthorized("Invalid token type"));
    }

    Ok(claims)
}

/// Validate token and additionally require the admin role. Template,
/// zone and user mutations are editor-only operations.
pub fn require_admin(req: &HttpRequest) -> Result<Claims, Error> {
    let claims = validate_request_token(req)?;
    if claims.role != "admin" {
        log::warn!("User {} with role '{}' denied access", claims.email, claims.role);
        return Err(ErrorForbidden("Admin role required"));
    }
    Ok(claims)
}

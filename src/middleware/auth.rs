use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use uuid::Uuid;

use crate::auth::Claims;
use crate::config;
use crate::error::ApiError;

/// Authenticated requester context extracted from a verified bearer token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub name: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
        }
    }
}

/// Bearer authentication middleware that validates tokens and injects the
/// requester identity. Runs before any protected handler; a missing or
/// invalid token never reaches the resource logic.
pub async fn bearer_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = validate_token(&token).map_err(ApiError::unauthorized)?;

    let auth_user = AuthUser::from(claims);
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate the token signature and expiry, returning the claims
fn validate_token(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("Token secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid bearer token: {}", e))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_token, Claims};
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert!(extract_bearer_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert!(extract_bearer_from_headers(&headers).is_err());

        headers.insert("authorization", HeaderValue::from_static("Bearer tok123"));
        assert_eq!(extract_bearer_from_headers(&headers).unwrap(), "tok123");
    }

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = generate_token(Claims::new(user_id, "alice".to_string())).unwrap();

        let claims = validate_token(&token).expect("freshly issued token should validate");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.name, "alice");
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate_token("not.a.token").is_err());
        assert!(validate_token("").is_err());
    }
}

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use types::account::ProfileHints;
use types::ids::UserId;

/// Claims carried by the identity provider's bearer tokens.
///
/// `sub` is the stable caller identifier the ledger keys accounts on.
/// The profile claims are optional hints, applied only when an account
/// is first provisioned.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// The verified caller, as extracted from the `Authorization` header.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub hints: ProfileHints,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication credentials".into()))?;
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid header string".into()))?;
        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected a bearer token".into()))?;

        // Default validation enforces HS256 and token expiry.
        let key = DecodingKey::from_secret(state.jwt_secret.as_bytes());
        let token_data = decode::<Claims>(token, &key, &Validation::default())
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;
        if claims.sub.is_empty() {
            return Err(AppError::Unauthorized("Token subject is empty".into()));
        }

        Ok(AuthenticatedUser {
            user_id: UserId::new(claims.sub),
            hints: ProfileHints {
                email: claims.email,
                display_name: claims.name,
            },
        })
    }
}

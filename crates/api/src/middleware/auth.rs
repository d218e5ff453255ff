//! Identity-resolution extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use manabi_core::error::CoreError;
use manabi_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::config::AuthConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Resolved owner identity for the current request.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; requests with no resolvable identity are rejected with
/// 401 before the handler body runs:
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(owner_id = %auth.owner_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The owner id every storage scope is built from.
    pub owner_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match &state.config.auth {
            AuthConfig::Mock { owner_id } => Ok(AuthUser {
                owner_id: *owner_id,
            }),
            AuthConfig::Jwt(jwt) => {
                let auth_header = parts
                    .headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| {
                        AppError::Core(CoreError::Unauthorized("Authentication required".into()))
                    })?;

                let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized(
                        "Invalid Authorization format. Expected: Bearer <token>".into(),
                    ))
                })?;

                let claims = validate_token(token, jwt).map_err(|_| {
                    AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
                })?;

                Ok(AuthUser {
                    owner_id: claims.sub,
                })
            }
        }
    }
}
